//! Prelude module - commonly used types for convenient import.
//!
//! Use `use marquee_events::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use marquee_events::prelude::*;
//!
//! let bus = EventBus::with_config(EventBusConfig::default().with_history(true));
//! let id = bus.subscribe_once("offline:status", |_| Ok(())).unwrap();
//!
//! bus.publish("offline:status", serde_json::json!({ "online": false }));
//!
//! assert!(!bus.unsubscribe("offline:status", id));
//! assert_eq!(bus.event_history().map(|h| h.len()), Some(1));
//! ```

// Event bus
pub use crate::{DebugInfo, EventBus, EventBusConfig, PublishReport};

// Subscriptions and listeners
pub use crate::{FnListener, Listener, SubscribeOptions, SubscriptionId};

// Typed topics
pub use crate::Topic;

// History
pub use crate::{DEFAULT_HISTORY_CAPACITY, HistoryEntry};

// Errors
pub use crate::{EventError, EventResult, ListenerError, ListenerResult};
