use std::error::Error;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Install the global `tracing` subscriber, writing to the log file.
///
/// The terminal belongs to the menus, so nothing is logged to stdout or
/// stderr. `RUST_LOG` wins over `logging.level`. Returns the file in use, or
/// `None` when no log location could be determined.
pub fn init_logging(settings: &Settings) -> Result<Option<PathBuf>, Box<dyn Error + Send + Sync>> {
    let Some(path) = settings.log_file() else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&settings.logging.level)?,
    };

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_env_filter(filter)
        .try_init()?;

    Ok(Some(path))
}
