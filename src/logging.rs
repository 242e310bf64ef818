use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::Error;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "quiztake=info";

/// Route `tracing` output to `log_file`. The terminal belongs to the TUI,
/// so nothing is written to stdout or stderr.
pub fn init_logging(log_file: &Path) -> Result<(), Error> {
    if let Some(parent) = log_file.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            Error::Logging(format!("cannot create {}: {}", parent.display(), e))
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .map_err(|e| Error::Logging(format!("cannot open {}: {}", log_file.display(), e)))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}
