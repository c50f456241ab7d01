//! Post-merge configuration validation.
//!
//! Validates that deserialized [`Config`](crate::Config) values are within
//! acceptable ranges.

use crate::error::{ConfigError, ConfigResult};
use crate::types::Config;

/// Upper bound on the event history size.
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

/// Validate a fully-merged and deserialized configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_events(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_events(config: &Config) -> ConfigResult<()> {
    let capacity = config.events.history_capacity;
    if capacity == 0 || capacity > MAX_HISTORY_CAPACITY {
        return Err(ConfigError::Invalid {
            field: "events.history_capacity",
            message: format!(
                "history_capacity must be between 1 and {MAX_HISTORY_CAPACITY}, got {capacity}"
            ),
        });
    }
    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
    let level = config.logging.level.to_ascii_lowercase();
    if !valid_levels.contains(&level.as_str()) {
        return Err(ConfigError::Invalid {
            field: "logging.level",
            message: format!(
                "unsupported log level '{}'; expected one of: {}",
                config.logging.level,
                valid_levels.join(", ")
            ),
        });
    }

    let valid_formats = ["pretty", "compact", "json", "full"];
    let format = config.logging.format.to_ascii_lowercase();
    if !valid_formats.contains(&format.as_str()) {
        return Err(ConfigError::Invalid {
            field: "logging.format",
            message: format!(
                "unsupported log format '{}'; expected one of: {}",
                config.logging.format,
                valid_formats.join(", ")
            ),
        });
    }

    if let Some(blank) = config.logging.directives.iter().find(|d| d.trim().is_empty()) {
        return Err(ConfigError::Invalid {
            field: "logging.directives",
            message: format!("directive {blank:?} is empty"),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: ConfigError) -> &'static str {
        match err {
            ConfigError::Invalid { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let mut config = Config::default();
        config.events.history_capacity = 0;
        assert_eq!(
            field_of(validate(&config).unwrap_err()),
            "events.history_capacity"
        );
    }

    #[test]
    fn test_capacity_upper_bound() {
        let mut config = Config::default();
        config.events.history_capacity = MAX_HISTORY_CAPACITY;
        assert!(validate(&config).is_ok());

        config.events.history_capacity = MAX_HISTORY_CAPACITY.saturating_add(1);
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_log_level_case_insensitive() {
        let mut config = Config::default();
        config.logging.level = "DEBUG".to_owned();
        assert!(validate(&config).is_ok());

        config.logging.level = "loud".to_owned();
        assert_eq!(field_of(validate(&config).unwrap_err()), "logging.level");
    }

    #[test]
    fn test_log_format_case_insensitive() {
        let mut config = Config::default();
        config.logging.format = "JSON".to_owned();
        assert!(validate(&config).is_ok());

        config.logging.format = "Compact".to_owned();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_bad_format_and_blank_directive() {
        let mut config = Config::default();
        config.logging.format = "xml".to_owned();
        assert_eq!(field_of(validate(&config).unwrap_err()), "logging.format");

        let mut config = Config::default();
        config.logging.directives = vec!["marquee_events=trace".to_owned(), " ".to_owned()];
        assert_eq!(
            field_of(validate(&config).unwrap_err()),
            "logging.directives"
        );
    }
}
