//! Typed topics: a compile-time pairing of an event name with its payload.
//!
//! Topics share the string namespace with the untyped API, so a typed
//! publisher can feed untyped listeners and the other way round. Payloads
//! cross the bus as JSON.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::bus::{EventBus, PublishReport};
use crate::error::{EventError, EventResult, ListenerResult};
use crate::listener::Listener;
use crate::subscription::{SubscribeOptions, SubscriptionId};

/// An event name together with the payload type published under it.
///
/// ```rust
/// use marquee_events::{EventBus, Topic};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Ping(u32);
///
/// struct PingTopic;
///
/// impl Topic for PingTopic {
///     const NAME: &'static str = "ping";
///     type Payload = Ping;
/// }
///
/// let bus = EventBus::new();
/// bus.subscribe_topic::<PingTopic, _>(|ping| {
///     assert_eq!(ping.0, 42);
///     Ok(())
/// })
/// .unwrap();
/// bus.publish_topic::<PingTopic>(&Ping(42)).unwrap();
/// ```
pub trait Topic {
    /// Event name on the bus.
    const NAME: &'static str;
    /// Payload carried by the event.
    type Payload: Serialize + DeserializeOwned;
}

/// Listener that decodes the JSON payload into `T::Payload` before calling
/// the handler.
struct TopicListener<T, F> {
    handler: F,
    _topic: PhantomData<fn() -> T>,
}

impl<T, F> Listener for TopicListener<T, F>
where
    T: Topic,
    F: Fn(T::Payload) -> ListenerResult + Send + Sync,
{
    fn on_event(&self, data: &Value) -> ListenerResult {
        let payload = <T::Payload as Deserialize>::deserialize(data)?;
        (self.handler)(payload)
    }

    fn name(&self) -> &str {
        T::NAME
    }
}

impl EventBus {
    /// Subscribe a typed handler to topic `T`.
    ///
    /// A published payload that does not decode as `T::Payload` counts as a
    /// listener failure and is logged.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidEventName`] if `T::NAME` is blank.
    pub fn subscribe_topic<T, F>(&self, handler: F) -> EventResult<SubscriptionId>
    where
        T: Topic + 'static,
        F: Fn(T::Payload) -> ListenerResult + Send + Sync + 'static,
    {
        self.subscribe_topic_with::<T, F>(handler, SubscribeOptions::default())
    }

    /// Subscribe a typed handler to topic `T` for a single delivery.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::InvalidEventName`] if `T::NAME` is blank.
    pub fn subscribe_topic_once<T, F>(&self, handler: F) -> EventResult<SubscriptionId>
    where
        T: Topic + 'static,
        F: Fn(T::Payload) -> ListenerResult + Send + Sync + 'static,
    {
        self.subscribe_topic_with::<T, F>(handler, SubscribeOptions::once())
    }

    fn subscribe_topic_with<T, F>(
        &self,
        handler: F,
        options: SubscribeOptions,
    ) -> EventResult<SubscriptionId>
    where
        T: Topic + 'static,
        F: Fn(T::Payload) -> ListenerResult + Send + Sync + 'static,
    {
        let listener = TopicListener::<T, F> {
            handler,
            _topic: PhantomData,
        };
        self.subscribe_listener(T::NAME, Arc::new(listener), options)
    }

    /// Remove a subscription made with [`subscribe_topic`](Self::subscribe_topic).
    pub fn unsubscribe_topic<T: Topic>(&self, id: SubscriptionId) -> bool {
        self.unsubscribe(T::NAME, id)
    }

    /// Publish a typed payload on topic `T`.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::Payload`] if the payload cannot be encoded as
    /// JSON. No listener is invoked in that case.
    pub fn publish_topic<T: Topic>(&self, payload: &T::Payload) -> EventResult<PublishReport> {
        let data = serde_json::to_value(payload).map_err(|source| EventError::Payload {
            topic: T::NAME,
            source,
        })?;
        Ok(self.publish(T::NAME, data))
    }
}
