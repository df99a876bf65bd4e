use crate::db::Store;
use crate::error::Result;
use crate::fmt::{format_bytes, money};
use crate::settings::Settings;

pub fn run(store: &Store, settings: &Settings) -> Result<()> {
    let db_path = settings.db_path();

    println!("Data dir:   {}", settings.data_dir);
    println!("Database:   {}", db_path.display());
    if let Ok(meta) = std::fs::metadata(&db_path) {
        println!("DB size:    {}", format_bytes(meta.len()));
    }
    println!("Currency:   {}", settings.currency);

    println!();
    println!("Transactions:  {}", store.transaction_count()?);
    println!("Categories:    {}", store.category_count()?);
    println!("Balance:       {}", money(store.get_balance()?, &settings.currency));
    Ok(())
}
