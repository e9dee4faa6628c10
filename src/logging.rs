//! Log subscriber installation.
//!
//! The terminal is owned by the interface while the game runs, so log records can only go to a
//! file. Without a file no subscriber is installed and every `tracing` macro becomes a no-op.

use std::{fs::File, path::Path, sync::Mutex};

use color_eyre::eyre::{eyre, Result, WrapErr as _};
use tracing_subscriber::EnvFilter;

/// Filter applied when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "info";

/// Installs the global log subscriber writing to `path`, if any.
///
/// The filter is read from `RUST_LOG` and falls back to [`DEFAULT_FILTER`].
///
/// # Errors
///
/// This function returns an error if the log file cannot be created or if a global subscriber was
/// already installed.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install log subscriber: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_without_file_is_noop() {
        assert!(init(None).is_ok());
    }

    #[test]
    fn test_init_reports_unwritable_path() {
        let path = Path::new("/nonexistent-directory/mazetrail.log");

        assert!(init(Some(path)).is_err());
    }
}
