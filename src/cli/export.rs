use std::path::{Path, PathBuf};

use tracing::info;

use crate::db::Store;
use crate::error::Result;
use crate::models::Transaction;
use crate::settings::Settings;

pub fn run(store: &Store, settings: &Settings, output: Option<String>) -> Result<()> {
    let dest = match output {
        Some(p) => PathBuf::from(p),
        None => {
            let exports_dir = PathBuf::from(&settings.data_dir).join("exports");
            std::fs::create_dir_all(&exports_dir)?;
            let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            exports_dir.join(format!("moliya-{stamp}.csv"))
        }
    };

    let transactions = store.list_transactions()?;
    write_csv(&dest, &transactions)?;
    info!(dest = %dest.display(), rows = transactions.len(), "exported transactions");

    println!("Exported {} transactions to {}", transactions.len(), dest.display());
    Ok(())
}

/// One header row, then rows in the order given.
pub fn write_csv(dest: &Path, transactions: &[Transaction]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(dest)?;
    if transactions.is_empty() {
        wtr.write_record(["id", "date", "kind", "category", "amount", "note"])?;
    }
    for txn in transactions {
        wtr.serialize(txn)?;
    }
    wtr.flush()?;
    Ok(())
}
