//! Backup export/import commands.

use std::path::PathBuf;

use clap::Subcommand;
use habitloop_core::backup::export_filename;

use super::{open_store, CliResult};

#[derive(Subcommand)]
pub enum BackupAction {
    /// Write the whole document to a JSON file
    Export {
        /// Output path (default: ./habit-backup-<date>.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Replace the document with a backup file
    Import {
        /// Backup file path
        path: PathBuf,
    },
}

pub fn run(action: BackupAction) -> CliResult {
    let mut store = open_store()?;

    match action {
        BackupAction::Export { out } => {
            let path = out.unwrap_or_else(|| PathBuf::from(export_filename(store.today())));
            std::fs::write(&path, store.export_state()?)?;
            println!("Backup written: {}", path.display());
        }
        BackupAction::Import { path } => {
            let content = std::fs::read_to_string(&path)?;
            store.import_state(&content)?;
            println!(
                "Imported {} days from {}",
                store.document().history.len(),
                path.display()
            );
        }
    }
    Ok(())
}
