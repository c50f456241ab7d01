//! Subscription handles and registration options.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::listener::Listener;

/// Registration handle for a subscription.
///
/// Ids are handed out in increasing order by a single bus and are never
/// reused for its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value of the handle.
    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Options accepted by `subscribe_with`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubscribeOptions {
    /// Remove the subscription after its first invocation.
    pub once: bool,
}

impl SubscribeOptions {
    /// Options for a subscription that fires a single time.
    #[must_use]
    pub fn once() -> Self {
        Self { once: true }
    }
}

/// One listener registered against one event name.
pub(crate) struct Subscription {
    pub(crate) id: SubscriptionId,
    pub(crate) event_name: String,
    pub(crate) listener: Arc<dyn Listener>,
    pub(crate) once: bool,
    /// Set on first invocation of a `once` subscription.
    fired: AtomicBool,
}

impl Subscription {
    pub(crate) fn new(
        id: SubscriptionId,
        event_name: String,
        listener: Arc<dyn Listener>,
        options: SubscribeOptions,
    ) -> Self {
        Self {
            id,
            event_name,
            listener,
            once: options.once,
            fired: AtomicBool::new(false),
        }
    }

    /// Claim the right to invoke this subscription.
    ///
    /// Always succeeds for regular subscriptions. A `once` subscription can
    /// be claimed a single time, so nested publishes holding it in their own
    /// snapshot do not fire it twice.
    pub(crate) fn claim(&self) -> bool {
        if !self.once {
            return true;
        }
        self.fired
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("event_name", &self.event_name)
            .field("listener", &self.listener.name())
            .field("once", &self.once)
            .finish()
    }
}
