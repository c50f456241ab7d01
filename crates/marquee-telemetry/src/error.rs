//! Logging setup errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::rolling::InitError as AppenderInitError;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;

/// Why logging could not be configured or installed.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Format name is not one of pretty, compact, json, full.
    #[error("unknown log format '{0}', expected pretty, compact, json or full")]
    UnknownFormat(String),

    /// Level or directive is not valid `EnvFilter` syntax.
    #[error("invalid log filter '{filter}': {source}")]
    Filter {
        /// The offending level or directive.
        filter: String,
        /// Parser error.
        #[source]
        source: ParseError,
    },

    /// The log directory could not be created.
    #[error("cannot create log directory {}: {source}", path.display())]
    LogDirectory {
        /// Directory passed to [`LogTarget::File`](crate::LogTarget::File).
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The rolling file appender could not open its first file.
    #[error("cannot open log files in {}: {source}", path.display())]
    Appender {
        /// Log directory.
        path: PathBuf,
        /// Appender error.
        #[source]
        source: AppenderInitError,
    },

    /// A global subscriber is already installed in this process.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(#[from] TryInitError),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
