//! Test harness helpers.

use std::io::Write;

use tempfile::NamedTempFile;
use tracing_subscriber::EnvFilter;

/// Set up test logging with the given filter.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn setup_test_logging(filter: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_test_writer()
        .try_init();
}

/// Set up test logging from `RUST_LOG`, falling back to `warn`.
pub fn init_test_logging() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".to_string());
    setup_test_logging(&filter);
}

/// Write `content` to a temporary `.toml` file.
///
/// The file is removed when the returned handle is dropped.
///
/// # Panics
///
/// Panics if the file cannot be created or written.
#[must_use]
pub fn test_config_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("marquee-")
        .suffix(".toml")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_has_toml_suffix() {
        let file = test_config_file("[events]\nhistory = \"enabled\"\n");
        assert!(file.path().to_string_lossy().ends_with(".toml"));

        let content = std::fs::read_to_string(file.path()).unwrap();
        assert!(content.contains("history"));
    }

    #[test]
    fn test_logging_init_is_idempotent() {
        init_test_logging();
        init_test_logging();
        tracing::warn!("still fine");
    }
}
