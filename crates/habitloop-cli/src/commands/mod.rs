pub mod backup;
pub mod config;
pub mod stats;
pub mod task;
pub mod timer;
pub mod today;

use habitloop_core::{Config, Database, HabitStore};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Load the config and open the store on the default database.
pub fn open_store() -> Result<HabitStore<Database>, Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let db = Database::open()?;
    Ok(HabitStore::open(config, db)?)
}
