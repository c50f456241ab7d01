//! Marquee Telemetry - Logging setup for the Marquee venue site.
//!
//! This crate provides:
//! - Configurable logging setup with multiple formats and targets
//! - Integration with the tracing ecosystem
//! - With the `config` feature, conversion from the `[logging]` section
//!
//! # Example
//!
//! ```rust,no_run
//! use marquee_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), marquee_telemetry::TelemetryError> {
//! let config = LogConfig::new("info")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("marquee_events=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("Site controllers starting");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

#[cfg(feature = "config")]
mod config;
mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
