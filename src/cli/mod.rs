pub mod add;
pub mod backup;
pub mod categories;
pub mod export;
pub mod init;
pub mod list;
pub mod status;

use clap::{Parser, Subcommand};

use crate::error::MoliyaError;
use crate::models::Kind;

fn parse_kind(s: &str) -> Result<Kind, String> {
    s.parse().map_err(|e: MoliyaError| e.to_string())
}

#[derive(Parser)]
#[command(name = "moliya", about = "Track income and expenses with a running balance.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Choose a data directory and create the database.
    Init {
        /// Directory for moliya.db (default: platform data dir)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
        /// Currency label shown after amounts
        #[arg(long)]
        currency: Option<String>,
    },
    #[command(flatten)]
    Store(StoreCommands),
}

/// Commands that run against the configured database.
#[derive(Subcommand)]
pub enum StoreCommands {
    /// Record a transaction. Missing fields are asked for interactively.
    Add {
        /// Amount, e.g. 125000
        #[arg(allow_negative_numbers = true)]
        amount: Option<String>,
        /// income or expense
        #[arg(long, value_parser = parse_kind)]
        kind: Option<Kind>,
        /// Category name
        #[arg(long)]
        category: Option<String>,
        /// Optional note
        #[arg(long)]
        note: Option<String>,
        /// Timestamp override: YYYY-MM-DD HH:MM
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the balance and transactions, newest first.
    List {
        /// Only show the most recent N transactions
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the running balance.
    Balance,
    /// Manage categories.
    Categories {
        #[command(subcommand)]
        command: CategoriesCommands,
    },
    /// Write all transactions to a CSV file.
    Export {
        /// Output path (default: <data_dir>/exports/moliya-YYYYMMDD-HHMMSS.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Back up the database.
    Backup {
        /// Output path (default: <data_dir>/backups/moliya-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
    },
    /// Show the data location and summary counts.
    Status,
}

#[derive(Subcommand)]
pub enum CategoriesCommands {
    /// List categories.
    List {
        /// Only show one kind: income or expense
        #[arg(long, value_parser = parse_kind)]
        kind: Option<Kind>,
    },
    /// Add a category.
    Add {
        /// Category name
        name: String,
        /// income or expense
        #[arg(long, value_parser = parse_kind)]
        kind: Kind,
    },
}
