use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::db::Store;
use crate::error::Result;
use crate::fmt::{money, signed_money};
use crate::models::Kind;
use crate::settings::Settings;

pub fn run(store: &Store, settings: &Settings, limit: Option<usize>) -> Result<()> {
    render(store, settings, limit)
}

/// Balance readout followed by the transaction table. Re-reads everything.
pub fn render(store: &Store, settings: &Settings, limit: Option<usize>) -> Result<()> {
    print_balance_line(store, settings)?;

    let transactions = store.list_transactions()?;
    if transactions.is_empty() {
        println!("No transactions yet. Add one with `moliya add`.");
        return Ok(());
    }

    let shown = limit.unwrap_or(transactions.len()).min(transactions.len());
    let mut table = Table::new();
    table.set_header(vec!["Date", "Kind", "Category", "Amount", "Note"]);
    for txn in transactions.iter().take(shown) {
        let amount = signed_money(txn.amount, txn.kind, &settings.currency);
        let (kind, amount) = match txn.kind {
            Kind::Income => (txn.kind.label().green(), amount.green()),
            Kind::Expense => (txn.kind.label().red(), amount.red()),
        };
        table.add_row(vec![
            Cell::new(&txn.date),
            Cell::new(kind),
            Cell::new(&txn.category),
            Cell::new(amount),
            Cell::new(&txn.note),
        ]);
    }
    println!("Transactions\n{table}");
    if shown < transactions.len() {
        println!("Showing {shown} of {} transactions.", transactions.len());
    }
    Ok(())
}

pub fn balance(store: &Store, settings: &Settings) -> Result<()> {
    let totals = store.totals()?;
    let mut table = Table::new();
    table.set_header(vec!["", "Amount"]);
    table.add_row(vec![
        Cell::new("Income".green().bold()),
        Cell::new(money(totals.income, &settings.currency)),
    ]);
    table.add_row(vec![
        Cell::new("Expense".red().bold()),
        Cell::new(money(totals.expense, &settings.currency)),
    ]);
    let label = if totals.balance() >= 0.0 {
        "BALANCE".green().bold()
    } else {
        "BALANCE".red().bold()
    };
    table.add_row(vec![
        Cell::new(label),
        Cell::new(money(totals.balance(), &settings.currency)),
    ]);
    println!("Balance\n{table}");
    Ok(())
}

fn print_balance_line(store: &Store, settings: &Settings) -> Result<()> {
    let balance = store.get_balance()?;
    let text = money(balance, &settings.currency);
    let text = if balance < 0.0 { text.red() } else { text.green() };
    println!("Balance: {}", text.bold());
    println!();
    Ok(())
}
