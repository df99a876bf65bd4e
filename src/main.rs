mod cli;
mod db;
mod error;
mod fmt;
mod form;
mod models;
mod settings;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{CategoriesCommands, Cli, Commands, StoreCommands};
use db::Store;
use error::Result;
use settings::load_settings;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Init { data_dir, currency }) => cli::init::run(data_dir, currency),
        Some(Commands::Store(command)) => run_with_store(command),
        None => run_with_store(StoreCommands::List { limit: None }),
    }
}

// Everything except `init` works against the configured database, opened once
// here and lent to the command.
fn run_with_store(command: StoreCommands) -> Result<()> {
    let settings = load_settings();
    let store = Store::open(&settings.db_path())?;

    match command {
        StoreCommands::Add {
            amount,
            kind,
            category,
            note,
            date,
        } => cli::add::run(&store, &settings, amount, kind, category, note, date),
        StoreCommands::List { limit } => cli::list::run(&store, &settings, limit),
        StoreCommands::Balance => cli::list::balance(&store, &settings),
        StoreCommands::Categories { command } => match command {
            CategoriesCommands::List { kind } => cli::categories::list(&store, kind),
            CategoriesCommands::Add { name, kind } => cli::categories::add(&store, &name, kind),
        },
        StoreCommands::Export { output } => cli::export::run(&store, &settings, output),
        StoreCommands::Backup { output } => cli::backup::run(&store, &settings, output),
        StoreCommands::Status => cli::status::run(&store, &settings),
    }
}
