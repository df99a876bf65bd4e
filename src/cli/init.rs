use std::path::PathBuf;

use tracing::info;

use crate::db::Store;
use crate::error::Result;
use crate::settings::{load_settings, save_settings, shellexpand_path};

pub fn run(data_dir: Option<String>, currency: Option<String>) -> Result<()> {
    let mut settings = load_settings();
    if let Some(dir) = data_dir {
        settings.data_dir = shellexpand_path(&dir);
    }
    if let Some(currency) = currency {
        settings.currency = currency;
    }

    // Only remember a data dir that actually holds a working database.
    let resolved = PathBuf::from(&settings.data_dir);
    std::fs::create_dir_all(&resolved)?;
    let store = Store::open(&settings.db_path())?;
    save_settings(&settings)?;
    info!(data_dir = %resolved.display(), "initialized");

    println!("Initialized moliya at {}", resolved.display());
    println!("Categories: {}", store.category_count()?);
    Ok(())
}
