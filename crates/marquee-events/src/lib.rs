//! Marquee Events - Publish/subscribe event bus for the Marquee venue site.
//!
//! This crate provides:
//! - A synchronous, in-process `EventBus` keyed by event name
//! - Once-only subscriptions and per-listener failure isolation
//! - An optional bounded history of published events for debugging
//! - Typed topics pairing an event name with a payload type
//! - The catalogue of events exchanged by the site's page controllers
//!
//! # Architecture
//!
//! A composition root builds one `EventBus` and hands clones to every
//! controller. Publishers call `publish` with an event name and a JSON
//! payload; every listener registered for that name runs immediately, in
//! registration order, over a snapshot of the subscriber list taken when the
//! publish started.
//!
//! A listener that returns an error or panics is logged and skipped. It never
//! affects its siblings or the publisher.
//!
//! # Example
//!
//! ```rust
//! use marquee_events::{EventBus, site::AgeVerified};
//!
//! let bus = EventBus::new();
//!
//! // The header only cares that the gate was passed.
//! bus.subscribe("age:verified", |_| Ok(())).unwrap();
//!
//! // Analytics wants the typed payload.
//! bus.subscribe_topic::<AgeVerified, _>(|verified| {
//!     assert!(verified.remember);
//!     Ok(())
//! })
//! .unwrap();
//!
//! let report = bus
//!     .publish_topic::<AgeVerified>(&AgeVerified {
//!         remember: true,
//!         expires_at: None,
//!     })
//!     .unwrap();
//! assert_eq!(report.delivered, 2);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;
pub mod site;

mod bus;
#[cfg(feature = "config")]
mod config;
mod error;
mod history;
mod listener;
mod subscription;
mod topic;

pub use bus::{DebugInfo, EventBus, EventBusConfig, PublishReport};
pub use error::{EventError, EventResult, ListenerError, ListenerResult};
pub use history::{DEFAULT_HISTORY_CAPACITY, HistoryEntry};
pub use listener::{FnListener, Listener};
pub use subscription::{SubscribeOptions, SubscriptionId};
pub use topic::Topic;
