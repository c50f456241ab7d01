//! Configuration struct definitions.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Event bus settings.
    pub events: EventsSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

// ---------------------------------------------------------------------------
// EventsSection
// ---------------------------------------------------------------------------

/// Whether the event bus keeps a debug history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// Follow the build profile: enabled in debug builds only.
    #[default]
    Auto,
    /// Always record history.
    Enabled,
    /// Never record history.
    Disabled,
}

impl HistoryMode {
    /// Resolve against the given build profile.
    #[must_use]
    pub fn resolve(self, debug_build: bool) -> bool {
        match self {
            Self::Auto => debug_build,
            Self::Enabled => true,
            Self::Disabled => false,
        }
    }

    /// Resolve against the profile this crate was built with.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self.resolve(cfg!(debug_assertions))
    }
}

/// Event bus configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventsSection {
    /// History recording mode.
    pub history: HistoryMode,
    /// Maximum number of published events kept in the history.
    pub history_capacity: usize,
}

impl Default for EventsSection {
    fn default() -> Self {
        Self {
            history: HistoryMode::Auto,
            history_capacity: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"` (human-friendly), `"compact"` (one-line),
    /// `"json"` (structured), or `"full"` (verbose).
    pub format: String,
    /// Per-crate tracing directives (e.g. `["marquee_events=trace"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "pretty".to_owned(),
            directives: Vec::new(),
        }
    }
}
