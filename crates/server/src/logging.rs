use crate::config::{LogFormat, LogLevel};
use crate::error::StartupError;
use tracing_subscriber::EnvFilter;

/// Install the process-wide subscriber. Logs go to stderr; stdout carries the MCP stream.
pub fn init(level: LogLevel, format: LogFormat) -> Result<(), StartupError> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false);

    let installed = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|e| StartupError::Logging(e.to_string()))
}
