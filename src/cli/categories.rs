use comfy_table::{Cell, Table};

use crate::db::Store;
use crate::error::{MoliyaError, Result};
use crate::models::Kind;

pub fn list(store: &Store, kind: Option<Kind>) -> Result<()> {
    let categories = store.categories(kind)?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name", "Kind"]);
    for cat in categories {
        table.add_row(vec![
            Cell::new(cat.id),
            Cell::new(cat.name),
            Cell::new(cat.kind.label()),
        ]);
    }
    println!("Categories\n{table}");
    Ok(())
}

pub fn add(store: &Store, name: &str, kind: Kind) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(MoliyaError::Validation("Category name is empty".to_string()));
    }
    if store.list_categories(kind)?.iter().any(|n| n == name) {
        println!("Category already exists: {name} ({kind})");
        return Ok(());
    }
    store.add_category(name, kind)?;
    println!("Added category: {name} ({kind})");
    Ok(())
}
