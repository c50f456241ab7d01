//! Marquee Test - Shared test utilities for the Marquee venue site.
//!
//! This crate provides listener doubles and test helpers used by the
//! integration tests.
//!
//! # Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use marquee_events::{EventBus, SubscribeOptions};
//! use marquee_test::{FailingListener, RecordingListener};
//! use serde_json::json;
//!
//! let bus = EventBus::new();
//! let header = RecordingListener::named("header");
//!
//! let failing = Arc::new(FailingListener::new("boom"));
//! bus.subscribe_listener("age:verified", failing, SubscribeOptions::default())
//!     .unwrap();
//! bus.subscribe_listener("age:verified", Arc::new(header.clone()), SubscribeOptions::default())
//!     .unwrap();
//!
//! let report = bus.publish("age:verified", json!({ "remember": true }));
//! assert_eq!(report.failed, 1);
//! assert_eq!(header.count(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod harness;
pub mod listeners;

pub use harness::*;
pub use listeners::*;
