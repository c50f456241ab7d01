//! Bridge from the `[logging]` configuration section.

use marquee_config::LoggingSection;

use crate::error::TelemetryError;
use crate::logging::{LogConfig, LogFormat};

impl TryFrom<&LoggingSection> for LogConfig {
    type Error = TelemetryError;

    fn try_from(section: &LoggingSection) -> Result<Self, Self::Error> {
        let format: LogFormat = section.format.parse()?;
        Ok(Self {
            level: section.level.to_ascii_lowercase(),
            format,
            directives: section.directives.clone(),
            ..Self::default()
        })
    }
}
