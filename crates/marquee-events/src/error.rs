//! Event bus error types.

use thiserror::Error;

/// Errors returned to callers of the event bus.
#[derive(Debug, Error)]
pub enum EventError {
    /// Event name was empty or whitespace only.
    #[error("invalid event name {name:?}: must be a non-empty string")]
    InvalidEventName {
        /// The rejected name.
        name: String,
    },

    /// A typed payload could not be converted to JSON.
    #[error("failed to encode payload for topic '{topic}': {source}")]
    Payload {
        /// Topic the payload was destined for.
        topic: &'static str,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for event bus operations.
pub type EventResult<T> = Result<T, EventError>;

/// Errors a listener may report while handling an event.
///
/// These never reach the publisher; the bus logs them and moves on to the
/// next listener.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The listener could not handle the event.
    #[error("{0}")]
    Failed(String),

    /// The payload did not match the listener's expected shape.
    #[error("payload mismatch: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ListenerError {
    /// Create a failure with a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// Result type returned by listeners.
pub type ListenerResult = Result<(), ListenerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_event_name_display() {
        let err = EventError::InvalidEventName {
            name: "  ".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid event name \"  \": must be a non-empty string"
        );
    }

    #[test]
    fn test_listener_error_from_json() {
        let json_err = serde_json::from_str::<u32>("\"nope\"").unwrap_err();
        let err = ListenerError::from(json_err);
        assert!(matches!(err, ListenerError::Payload(_)));
        assert!(err.to_string().starts_with("payload mismatch"));
    }

    #[test]
    fn test_listener_error_failed() {
        let err = ListenerError::failed("header not mounted");
        assert_eq!(err.to_string(), "header not mounted");
    }
}
