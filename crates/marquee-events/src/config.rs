//! Bridge from `marquee-config` settings to bus construction options.

use marquee_config::EventsSection;

use crate::bus::{EventBus, EventBusConfig};

impl From<&EventsSection> for EventBusConfig {
    fn from(section: &EventsSection) -> Self {
        Self {
            history: section.history.is_enabled(),
            history_capacity: section.history_capacity,
        }
    }
}

impl EventBus {
    /// Build a bus from the `[events]` configuration section.
    #[must_use]
    pub fn from_config(section: &EventsSection) -> Self {
        Self::with_config(EventBusConfig::from(section))
    }
}
