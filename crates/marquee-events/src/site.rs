//! Events exchanged between the venue site's page controllers.
//!
//! Each type here is both the [`Topic`] marker and, where it carries data,
//! the payload. Names are plain strings, so controllers that only know the
//! name can still publish or listen without these types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::topic::Topic;

/// Every event name in the site catalogue.
pub const SITE_EVENT_NAMES: &[&str] = &[
    AgeVerified::NAME,
    AgeDenied::NAME,
    TabsChanged::NAME,
    SliderChanged::NAME,
    FormSubmitted::NAME,
    OfflineStatus::NAME,
];

/// Visitor passed the age gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeVerified {
    /// Visitor asked to be remembered on this device.
    pub remember: bool,
    /// When a remembered verification lapses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Topic for AgeVerified {
    const NAME: &'static str = "age:verified";
    type Payload = Self;
}

/// Visitor failed or declined the age gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeDenied {
    /// Where the visitor is sent instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl Topic for AgeDenied {
    const NAME: &'static str = "age:denied";
    type Payload = Self;
}

/// A tab panel switched to another tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabsChanged {
    /// Identifier of the tab group.
    pub group: String,
    /// Newly active tab.
    pub index: usize,
    /// Previously active tab, if any.
    #[serde(default)]
    pub previous: Option<usize>,
}

impl Topic for TabsChanged {
    const NAME: &'static str = "tabs:changed";
    type Payload = Self;
}

/// A slider or carousel moved to another slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderChanged {
    /// Identifier of the slider.
    pub slider: String,
    /// Newly visible slide.
    pub index: usize,
    /// Number of slides.
    pub total: usize,
}

impl SliderChanged {
    /// Whether the visible slide is the last one.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index.checked_add(1) == Some(self.total)
    }
}

impl Topic for SliderChanged {
    const NAME: &'static str = "slider:changed";
    type Payload = Self;
}

/// A form passed validation and was submitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSubmitted {
    /// Form identifier (e.g. `newsletter`, `booking`).
    pub form: String,
    /// Submitted field values.
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

impl Topic for FormSubmitted {
    const NAME: &'static str = "form:submitted";
    type Payload = Self;
}

/// Network connectivity changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfflineStatus {
    /// `true` when the browser is back online.
    pub online: bool,
}

impl Topic for OfflineStatus {
    const NAME: &'static str = "offline:status";
    type Payload = Self;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::EventBus;
    use serde_json::json;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_event_names_are_unique() {
        let unique: HashSet<_> = SITE_EVENT_NAMES.iter().collect();
        assert_eq!(unique.len(), SITE_EVENT_NAMES.len());
        assert!(SITE_EVENT_NAMES.iter().all(|n| n.contains(':')));
    }

    #[test]
    fn test_age_verified_wire_shape() {
        let payload = AgeVerified {
            remember: true,
            expires_at: None,
        };
        assert_eq!(serde_json::to_value(&payload).unwrap(), json!({"remember": true}));

        let parsed: AgeVerified =
            serde_json::from_value(json!({"remember": false})).unwrap();
        assert!(!parsed.remember);
        assert!(parsed.expires_at.is_none());
    }

    #[test]
    fn test_untyped_publish_reaches_typed_listener() {
        let bus = EventBus::new();
        let seen: Arc<Mutex<Vec<TabsChanged>>> = Arc::default();
        let sink = Arc::clone(&seen);

        bus.subscribe_topic::<TabsChanged, _>(move |change| {
            sink.lock().unwrap().push(change);
            Ok(())
        })
        .unwrap();

        bus.publish("tabs:changed", json!({"group": "menu", "index": 2}));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![TabsChanged {
                group: "menu".to_string(),
                index: 2,
                previous: None,
            }]
        );
    }

    #[test]
    fn test_slider_is_last() {
        let change = SliderChanged {
            slider: "hero".to_string(),
            index: 4,
            total: 5,
        };
        assert!(change.is_last());
        assert!(
            !SliderChanged {
                index: 0,
                ..change
            }
            .is_last()
        );
    }

    #[test]
    fn test_form_fields_default_empty() {
        let parsed: FormSubmitted =
            serde_json::from_value(json!({"form": "newsletter"})).unwrap();
        assert!(parsed.fields.is_empty());
    }
}
