#![forbid(unsafe_code)]

//! Log output for the demo.
//!
//! The board owns the terminal while the demo runs, so logs only go to a file
//! named by `SPLITFLAP_LOG_FILE`. Without it no subscriber is installed and
//! the core's events are dropped.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Filter directive variable, e.g. `debug` or `splitflap_core=trace`.
pub const LOG_FILTER_ENV: &str = "SPLITFLAP_LOG";
/// Destination file variable.
pub const LOG_FILE_ENV: &str = "SPLITFLAP_LOG_FILE";

const DEFAULT_FILTER: &str = "info";

/// Build the filter from `SPLITFLAP_LOG`, falling back to `info` when the
/// variable is unset or invalid.
#[must_use]
pub fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .or_else(|_| EnvFilter::try_new(DEFAULT_FILTER))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a global fmt subscriber writing to `path`.
///
/// Returns `Ok(false)` when a subscriber was already installed.
pub fn init_file(path: &Path) -> io::Result<bool> {
    let file = File::create(path)?;
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter_from_env())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .is_ok();
    Ok(installed)
}

/// Install file logging if `SPLITFLAP_LOG_FILE` is set.
pub fn init_from_env() -> io::Result<bool> {
    match std::env::var_os(LOG_FILE_ENV) {
        Some(path) if !path.is_empty() => init_file(Path::new(&path)),
        _ => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn file_subscriber_creates_file() {
        let path = std::env::temp_dir().join(format!(
            "splitflap-demo-log-{}.log",
            std::process::id()
        ));
        init_file(&path).unwrap();
        tracing::info!("probe");
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
