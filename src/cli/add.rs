use colored::Colorize;
use dialoguer::{Input, Select};

use crate::cli::list;
use crate::db::Store;
use crate::error::Result;
use crate::fmt::signed_money;
use crate::form::{parse_date, TransactionForm};
use crate::models::Kind;
use crate::settings::Settings;

const RECENT_AFTER_ADD: usize = 10;

pub fn run(
    store: &Store,
    settings: &Settings,
    amount: Option<String>,
    kind: Option<Kind>,
    category: Option<String>,
    note: Option<String>,
    date: Option<String>,
) -> Result<()> {
    let date = date.as_deref().map(parse_date).transpose()?;
    let interactive = amount.is_none() || kind.is_none() || category.is_none();

    let amount = match amount {
        Some(a) => a,
        None => prompt_text("Amount")?,
    };
    let kind = match kind {
        Some(k) => k,
        None => prompt_kind()?,
    };
    let category = match category {
        Some(c) => Some(c),
        None => prompt_category(store, kind)?,
    };
    let note = match note {
        Some(n) => n,
        None if interactive => prompt_text("Note (Enter to skip)")?,
        None => String::new(),
    };

    let form = TransactionForm {
        amount,
        kind,
        category,
        note,
    };
    let txn = match date {
        Some(d) => form.validate_at(d)?,
        None => form.validate()?,
    };

    if !store.list_categories(kind)?.contains(&txn.category) {
        println!(
            "{}",
            format!("Note: '{}' is not a known {kind} category.", txn.category).yellow()
        );
    }

    store.add_transaction(&txn)?;
    println!(
        "{}",
        format!(
            "Added {} {} ({})",
            kind,
            signed_money(txn.amount, kind, &settings.currency),
            txn.category
        )
        .green()
    );
    println!();

    list::render(store, settings, Some(RECENT_AFTER_ADD))
}

// Empty input is allowed through; the form decides what is missing.
fn prompt_text(prompt: &str) -> Result<String> {
    let text: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(text)
}

fn prompt_kind() -> Result<Kind> {
    let labels: Vec<&str> = Kind::ALL.iter().map(|k| k.label()).collect();
    let idx = Select::new()
        .with_prompt("Kind")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Kind::ALL[idx])
}

// Escape leaves the category unset so the form reports it.
fn prompt_category(store: &Store, kind: Kind) -> Result<Option<String>> {
    let mut names = store.list_categories(kind)?;
    if names.is_empty() {
        return Ok(None);
    }
    let choice = Select::new()
        .with_prompt("Category")
        .items(&names)
        .default(0)
        .interact_opt()?;
    Ok(choice.map(|idx| names.swap_remove(idx)))
}
