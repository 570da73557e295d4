use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle, WriteMode};

use crate::cli::LogLevel;

/// Starts a stderr logger at `level`, unless `RUST_LOG` is set.
///
/// The returned handle must stay alive for the logger to keep writing.
pub fn init(level: LogLevel) -> Result<LoggerHandle> {
    Logger::try_with_env_or_str(level.as_str())
        .with_context(|| format!("Invalid log level: {}", level.as_str()))?
        .log_to_stderr()
        .write_mode(WriteMode::Direct)
        .format_for_stderr(flexi_logger::default_format)
        .start()
        .context("Failed to start logger")
}
