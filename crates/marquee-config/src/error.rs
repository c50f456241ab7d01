//! Configuration errors.

use std::io;

use thiserror::Error;

/// Why a configuration could not be produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be opened or read.
    #[error("cannot read config file {path}: {source}")]
    Read {
        /// Path as given.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The config file exceeds [`MAX_CONFIG_FILE_SIZE`](crate::loader::MAX_CONFIG_FILE_SIZE).
    #[error("config file {path} is {size} bytes, limit is {limit}")]
    FileTooLarge {
        /// Path as given.
        path: String,
        /// Size reported by the filesystem.
        size: u64,
        /// Maximum accepted size.
        limit: u64,
    },

    /// TOML syntax error, or a value of the wrong type.
    #[error("invalid TOML in {origin}: {source}")]
    Parse {
        /// File path, or a `<...>` label for embedded and merged sources.
        origin: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A setting parsed but is out of range or not recognised.
    #[error("invalid {field}: {message}")]
    Invalid {
        /// Dotted field path, e.g. `events.history_capacity`.
        field: &'static str,
        /// What is wrong with it.
        message: String,
    },

    /// A `MARQUEE_*` variable could not be coerced to its field's type.
    #[error("${var_name}: {message}")]
    Env {
        /// Variable name.
        var_name: &'static str,
        /// What is wrong with it.
        message: String,
    },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
