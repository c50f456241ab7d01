//! Synchronous publish/subscribe event bus.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace, warn};

use crate::error::{EventError, EventResult, ListenerResult};
use crate::history::{DEFAULT_HISTORY_CAPACITY, EventHistory, HistoryEntry};
use crate::listener::{FnListener, Listener};
use crate::subscription::{SubscribeOptions, Subscription, SubscriptionId};

type Registry = HashMap<String, Vec<Arc<Subscription>>>;

/// Construction options for an [`EventBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventBusConfig {
    /// Record published events in a bounded history buffer.
    pub history: bool,
    /// Maximum number of history entries kept.
    pub history_capacity: usize,
}

impl Default for EventBusConfig {
    /// History follows the build profile: on in debug builds, off in release.
    fn default() -> Self {
        Self {
            history: cfg!(debug_assertions),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl EventBusConfig {
    /// Enable or disable the event history.
    #[must_use]
    pub fn with_history(mut self, enabled: bool) -> Self {
        self.history = enabled;
        self
    }

    /// Set the history capacity.
    #[must_use]
    pub fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }
}

/// Outcome of a single `publish` call.
///
/// Informational only: listener failures are already logged by the bus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    /// Listeners that handled the event without error.
    pub delivered: usize,
    /// Listeners that returned an error or panicked.
    pub failed: usize,
}

impl PublishReport {
    /// Number of listeners invoked.
    #[must_use]
    pub fn invoked(&self) -> usize {
        self.delivered.saturating_add(self.failed)
    }
}

/// Snapshot of the bus state for debugging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DebugInfo {
    /// Subscription count per event name.
    pub events: BTreeMap<String, usize>,
    /// Sum of `events`.
    pub total_subscriptions: usize,
    /// Whether the history buffer exists.
    pub history_enabled: bool,
    /// Entries currently held in the history.
    pub history_len: usize,
    /// Maximum history entries; 0 when history is disabled.
    pub history_capacity: usize,
}

struct Inner {
    registry: RwLock<Registry>,
    next_id: AtomicU64,
    history: Option<Mutex<EventHistory>>,
}

/// Named-event dispatcher with synchronous, in-order delivery.
///
/// Cloning is cheap; clones share the same registry and history, so a
/// composition root can build one bus and hand clones to every component.
///
/// Listeners run on the publisher's thread with no internal lock held, so
/// they may subscribe, unsubscribe, or publish from inside a callback.
///
/// # Example
///
/// ```rust
/// use marquee_events::EventBus;
/// use serde_json::json;
///
/// let bus = EventBus::new();
/// let id = bus
///     .subscribe("age:verified", |data| {
///         assert_eq!(data["remember"], json!(true));
///         Ok(())
///     })
///     .unwrap();
///
/// let report = bus.publish("age:verified", json!({ "remember": true }));
/// assert_eq!(report.delivered, 1);
/// assert!(bus.unsubscribe("age:verified", id));
/// ```
#[derive(Clone)]
pub struct EventBus {
    inner: Arc<Inner>,
}

impl EventBus {
    /// Create a bus with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a bus with explicit settings.
    #[must_use]
    pub fn with_config(config: EventBusConfig) -> Self {
        let history = config
            .history
            .then(|| Mutex::new(EventHistory::new(config.history_capacity)));

        Self {
            inner: Arc::new(Inner {
                registry: RwLock::new(HashMap::new()),
                next_id: AtomicU64::new(0),
                history,
            }),
        }
    }

    /// Subscribe a closure to `event_name`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidEventName`] if `event_name` is empty or
    /// whitespace only. Nothing is registered in that case.
    pub fn subscribe<F>(&self, event_name: &str, callback: F) -> EventResult<SubscriptionId>
    where
        F: Fn(&Value) -> ListenerResult + Send + Sync + 'static,
    {
        self.subscribe_with(event_name, callback, SubscribeOptions::default())
    }

    /// Subscribe a closure that is removed after its first invocation.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidEventName`] if `event_name` is empty or
    /// whitespace only.
    pub fn subscribe_once<F>(&self, event_name: &str, callback: F) -> EventResult<SubscriptionId>
    where
        F: Fn(&Value) -> ListenerResult + Send + Sync + 'static,
    {
        self.subscribe_with(event_name, callback, SubscribeOptions::once())
    }

    /// Subscribe a closure with explicit options.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidEventName`] if `event_name` is empty or
    /// whitespace only.
    pub fn subscribe_with<F>(
        &self,
        event_name: &str,
        callback: F,
        options: SubscribeOptions,
    ) -> EventResult<SubscriptionId>
    where
        F: Fn(&Value) -> ListenerResult + Send + Sync + 'static,
    {
        self.subscribe_listener(event_name, Arc::new(FnListener::new(callback)), options)
    }

    /// Subscribe a [`Listener`] implementation.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidEventName`] if `event_name` is empty or
    /// whitespace only.
    pub fn subscribe_listener(
        &self,
        event_name: &str,
        listener: Arc<dyn Listener>,
        options: SubscribeOptions,
    ) -> EventResult<SubscriptionId> {
        validate_event_name(event_name)?;

        let id = SubscriptionId::new(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let name = listener.name().to_string();
        let subscription = Subscription::new(id, event_name.to_string(), listener, options);

        self.write_registry()
            .entry(event_name.to_string())
            .or_default()
            .push(Arc::new(subscription));

        debug!(
            event_name,
            subscription_id = %id,
            listener = %name,
            once = options.once,
            "Subscription registered"
        );
        Ok(id)
    }

    /// Remove the subscription `id` from `event_name`.
    ///
    /// Returns `true` if a subscription was removed. An unknown name or id is
    /// not an error.
    pub fn unsubscribe(&self, event_name: &str, id: SubscriptionId) -> bool {
        let mut registry = self.write_registry();
        let Some(subs) = registry.get_mut(event_name) else {
            return false;
        };
        let Some(pos) = subs.iter().position(|s| s.id == id) else {
            return false;
        };
        subs.remove(pos);
        drop(registry);

        debug!(event_name, subscription_id = %id, "Subscription removed");
        true
    }

    /// Remove every subscription for `event_name`, or for all names when
    /// `None`.
    pub fn unsubscribe_all(&self, event_name: Option<&str>) {
        let mut registry = self.write_registry();
        match event_name {
            Some(name) => {
                if let Some(removed) = registry.remove(name) {
                    debug!(event_name = name, count = removed.len(), "Event cleared");
                }
            },
            None => {
                registry.clear();
                debug!("All subscriptions cleared");
            },
        }
    }

    /// Publish `data` to every listener of `event_name`.
    ///
    /// Listeners are invoked in registration order over a snapshot taken at
    /// the start of the call; subscriptions added meanwhile only see later
    /// publishes. A listener that fails or panics is logged and skipped.
    /// `once` subscriptions that were invoked are removed after the whole
    /// snapshot has run.
    pub fn publish(&self, event_name: &str, data: impl Into<Value>) -> PublishReport {
        let data = data.into();

        if let Some(history) = &self.inner.history {
            lock_history(history).record(event_name, &data);
        }

        let snapshot: Vec<Arc<Subscription>> = match self.read_registry().get(event_name) {
            Some(subs) if !subs.is_empty() => subs.clone(),
            _ => {
                trace!(event_name, "No listeners for event");
                return PublishReport::default();
            },
        };

        trace!(event_name, listeners = snapshot.len(), "Publishing event");

        let mut report = PublishReport::default();
        let mut spent = Vec::new();

        for subscription in &snapshot {
            if !subscription.claim() {
                continue;
            }
            if subscription.once {
                spent.push(subscription.id);
            }
            if invoke(subscription, &data) {
                report.delivered = report.delivered.saturating_add(1);
            } else {
                report.failed = report.failed.saturating_add(1);
            }
        }

        if !spent.is_empty() {
            self.remove_spent(event_name, &spent);
        }

        report
    }

    /// Copy of the event history, or `None` when history is disabled.
    #[must_use]
    pub fn event_history(&self) -> Option<Vec<HistoryEntry>> {
        self.inner
            .history
            .as_ref()
            .map(|history| lock_history(history).snapshot())
    }

    /// Drop all recorded history entries. No-op when history is disabled.
    pub fn clear_history(&self) {
        if let Some(history) = &self.inner.history {
            lock_history(history).clear();
        }
    }

    /// Whether this bus records history.
    #[must_use]
    pub fn history_enabled(&self) -> bool {
        self.inner.history.is_some()
    }

    /// Event names that currently have at least one subscription.
    #[must_use]
    pub fn event_types(&self) -> BTreeSet<String> {
        self.read_registry()
            .iter()
            .filter(|(_, subs)| !subs.is_empty())
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Subscription counts for `event_name`, or for every known name.
    #[must_use]
    pub fn debug_info(&self, event_name: Option<&str>) -> DebugInfo {
        let events: BTreeMap<String, usize> = {
            let registry = self.read_registry();
            match event_name {
                Some(name) => {
                    let count = registry.get(name).map_or(0, Vec::len);
                    BTreeMap::from([(name.to_string(), count)])
                },
                None => registry
                    .iter()
                    .map(|(name, subs)| (name.clone(), subs.len()))
                    .collect(),
            }
        };

        let (history_len, history_capacity) =
            self.inner.history.as_ref().map_or((0, 0), |history| {
                let history = lock_history(history);
                (history.len(), history.capacity())
            });

        DebugInfo {
            total_subscriptions: events
                .values()
                .fold(0usize, |acc, n| acc.saturating_add(*n)),
            events,
            history_enabled: self.history_enabled(),
            history_len,
            history_capacity,
        }
    }

    /// Total number of live subscriptions across all event names.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.read_registry()
            .values()
            .fold(0usize, |acc, subs| acc.saturating_add(subs.len()))
    }

    /// Whether no subscriptions are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscription_count() == 0
    }

    fn remove_spent(&self, event_name: &str, spent: &[SubscriptionId]) {
        let mut registry = self.write_registry();
        if let Some(subs) = registry.get_mut(event_name) {
            subs.retain(|s| !spent.contains(&s.id));
        }
        drop(registry);

        trace!(event_name, count = spent.len(), "Once subscriptions removed");
    }

    // Listener code never runs under these locks, so a poisoned lock still
    // guards a consistent registry.
    fn read_registry(&self) -> RwLockReadGuard<'_, Registry> {
        self.inner
            .registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn write_registry(&self) -> RwLockWriteGuard<'_, Registry> {
        self.inner
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscription_count", &self.subscription_count())
            .field("history_enabled", &self.history_enabled())
            .finish()
    }
}

fn validate_event_name(event_name: &str) -> EventResult<()> {
    if event_name.trim().is_empty() {
        warn!(
            event_name = ?event_name,
            "Rejected subscription: event name must be a non-empty string"
        );
        return Err(EventError::InvalidEventName {
            name: event_name.to_string(),
        });
    }
    Ok(())
}

fn lock_history(history: &Mutex<EventHistory>) -> MutexGuard<'_, EventHistory> {
    history.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Run one listener, containing both errors and panics.
///
/// Returns `true` if the listener handled the event.
fn invoke(subscription: &Subscription, data: &Value) -> bool {
    let result = catch_unwind(AssertUnwindSafe(|| subscription.listener.on_event(data)));

    match result {
        Ok(Ok(())) => true,
        Ok(Err(e)) => {
            warn!(
                event_name = %subscription.event_name,
                subscription_id = %subscription.id,
                listener = %subscription.listener.name(),
                error = %e,
                "Listener failed"
            );
            false
        },
        Err(panic) => {
            warn!(
                event_name = %subscription.event_name,
                subscription_id = %subscription.id,
                listener = %subscription.listener.name(),
                panic = %panic_message(panic.as_ref()),
                "Listener panicked"
            );
            false
        },
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
