//! Logging setup for the binary
//!
//! The panel is printed on the terminal, so logs always go to a file.
//! `RUST_LOG` overrides the default `info` filter.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Default log file location: `<tmp>/bytesight.log`
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("bytesight.log")
}

/// Install the global subscriber writing to `log_path`.
///
/// Fails if the file cannot be created. Installing twice is a no-op.
pub fn init(log_path: &Path) -> std::io::Result<()> {
    let file = File::create(log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    tracing::info!("Logging to {}", log_path.display());
    Ok(())
}
