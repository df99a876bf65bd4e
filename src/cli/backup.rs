use std::path::PathBuf;

use crate::db::Store;
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::settings::Settings;

pub fn run(store: &Store, settings: &Settings, output: Option<String>) -> Result<()> {
    let dest_path = match output {
        Some(p) => PathBuf::from(p),
        None => {
            let backups_dir = PathBuf::from(&settings.data_dir).join("backups");
            std::fs::create_dir_all(&backups_dir)?;
            let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S");
            backups_dir.join(format!("moliya-{stamp}.db"))
        }
    };

    store.backup_to(&dest_path)?;

    let size = std::fs::metadata(&dest_path)?.len();
    println!("Backup saved to {}", dest_path.display());
    println!("Size: {}", format_bytes(size));
    Ok(())
}
