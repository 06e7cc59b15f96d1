use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;

/// Sends tracing output to `path` so it never lands on the game screen.
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init(path: &Path) -> Result<(), AppError>
{
    let log_file = File::create(path).map_err(|err| {
        AppError::new(format!("Failed to create log file {}: {err}", path.display()))
    })?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| AppError::new(format!("Failed to install log subscriber: {err}")))
}
