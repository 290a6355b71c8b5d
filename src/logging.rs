// Logging setup.
// Routes tracing output to a log file so it doesn't draw over the terminal UI.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::error::{Result, ShowcaseError};

const DEFAULT_FILTER: &str = "showcase=info";
const LOG_FILE: &str = "showcase.log";

/// Install the global subscriber writing to `<dir>/showcase.log`.
///
/// `RUST_LOG` overrides the default filter. Keep the returned guard alive for
/// the life of the program or buffered lines are lost.
pub fn init(dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(dir)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| ShowcaseError::Other(format!("failed to install logger: {}", e)))?;

    Ok(guard)
}
