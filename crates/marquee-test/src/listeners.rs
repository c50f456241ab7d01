//! Listener doubles for exercising the event bus.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use marquee_events::{Listener, ListenerError, ListenerResult};
use serde_json::Value;

/// Listener that records every payload it receives.
///
/// Clones share the same recording, so keep one clone in the test and hand
/// another to the bus.
#[derive(Debug, Clone)]
pub struct RecordingListener {
    name: String,
    received: Arc<Mutex<Vec<Value>>>,
}

impl RecordingListener {
    /// Create an anonymous recording listener.
    #[must_use]
    pub fn new() -> Self {
        Self::named("recording")
    }

    /// Create a recording listener with a name that shows up in logs.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Payloads received so far, in delivery order.
    #[must_use]
    pub fn received(&self) -> Vec<Value> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of payloads received.
    #[must_use]
    pub fn count(&self) -> usize {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Most recent payload, if any.
    #[must_use]
    pub fn last(&self) -> Option<Value> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for RecordingListener {
    fn default() -> Self {
        Self::new()
    }
}

impl Listener for RecordingListener {
    fn on_event(&self, data: &Value) -> ListenerResult {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(data.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Listener that always returns an error.
#[derive(Debug, Default)]
pub struct FailingListener {
    message: String,
    calls: AtomicUsize,
}

impl FailingListener {
    /// Create a listener that fails with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of times the listener was invoked.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Listener for FailingListener {
    fn on_event(&self, _data: &Value) -> ListenerResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ListenerError::failed(self.message.clone()))
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "failing"
    }
}

/// Listener that panics when invoked.
#[derive(Debug, Default)]
pub struct PanickingListener {
    message: String,
}

impl PanickingListener {
    /// Create a listener that panics with `message`.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Listener for PanickingListener {
    fn on_event(&self, _data: &Value) -> ListenerResult {
        panic!("{}", self.message);
    }

    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "panicking"
    }
}
