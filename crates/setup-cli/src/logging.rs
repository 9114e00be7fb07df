use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    /// Append to a file.
    File(PathBuf),
    /// Write to stderr; only safe when the interactive UI is not running.
    Stderr,
    /// No subscriber is installed.
    Disabled,
}

/// Initialize a tracing subscriber for `sink`.
///
/// Uses the `RUST_LOG` environment variable to determine the log level,
/// defaulting to "info", or "debug" when `verbose` is set.
pub fn init(sink: LogSink, verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| CliError::Logging(e.to_string()))?;

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .compact();

    let result = match sink {
        LogSink::Disabled => return Ok(()),
        LogSink::Stderr => tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer.with_writer(std::io::stderr))
            .try_init(),
        LogSink::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(&path)?;
            tracing_subscriber::registry()
                .with(filter_layer)
                .with(fmt_layer.with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
        }
    };

    result.map_err(|e| CliError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_sink_installs_nothing() {
        assert!(init(LogSink::Disabled, true).is_ok());
    }

    #[test]
    fn test_unwritable_log_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        // A directory cannot be opened for appending
        let result = init(LogSink::File(temp.path().to_path_buf()), false);
        assert!(result.is_err());
    }
}
