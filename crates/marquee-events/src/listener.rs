//! Listener trait and closure adapter.

use serde_json::Value;

use crate::error::ListenerResult;

/// Trait for event listeners.
///
/// Listeners run synchronously inside `publish`, on the publisher's thread.
/// Keep `on_event` short. Returning an error (or panicking) is reported and
/// isolated: sibling listeners still receive the event.
pub trait Listener: Send + Sync {
    /// Called when an event this listener is subscribed to is published.
    ///
    /// # Errors
    ///
    /// Return a [`ListenerError`](crate::ListenerError) when the event cannot
    /// be handled. The bus logs it and continues dispatch.
    fn on_event(&self, data: &Value) -> ListenerResult;

    /// Optional name for debugging.
    #[allow(clippy::unnecessary_literal_bound)]
    fn name(&self) -> &str {
        "anonymous"
    }
}

/// Listener backed by a closure.
pub struct FnListener<F>
where
    F: Fn(&Value) -> ListenerResult + Send + Sync,
{
    name: String,
    handler: F,
}

impl<F> FnListener<F>
where
    F: Fn(&Value) -> ListenerResult + Send + Sync,
{
    /// Wrap a closure as an anonymous listener.
    pub fn new(handler: F) -> Self {
        Self {
            name: "anonymous".to_string(),
            handler,
        }
    }

    /// Wrap a closure with a name that shows up in logs.
    pub fn named(name: impl Into<String>, handler: F) -> Self {
        Self {
            name: name.into(),
            handler,
        }
    }
}

impl<F> Listener for FnListener<F>
where
    F: Fn(&Value) -> ListenerResult + Send + Sync,
{
    fn on_event(&self, data: &Value) -> ListenerResult {
        (self.handler)(data)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<F> std::fmt::Debug for FnListener<F>
where
    F: Fn(&Value) -> ListenerResult + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnListener")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ListenerError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_fn_listener_invokes_closure() {
        let calls = AtomicUsize::new(0);
        let listener = FnListener::new(|data: &Value| {
            assert_eq!(data, &json!({"ok": true}));
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        });

        listener.on_event(&json!({"ok": true})).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(listener.name(), "anonymous");
    }

    #[test]
    fn test_fn_listener_named_and_failing() {
        let listener = FnListener::named("header", |_: &Value| {
            Err(ListenerError::failed("not mounted"))
        });

        assert_eq!(listener.name(), "header");
        assert!(listener.on_event(&Value::Null).is_err());
        assert!(format!("{listener:?}").contains("header"));
    }
}
