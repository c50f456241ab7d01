//! Integration tests for the site controllers talking over one shared bus.
//!
//! A composition root builds the bus and hands clones to the age gate, the
//! splash screen, the header and analytics. The age gate publishes; the
//! others react without knowing about each other.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use chrono::{Duration, Utc};
use marquee_events::site::{AgeDenied, AgeVerified, OfflineStatus, SliderChanged};
use marquee_events::{
    EventBus, EventBusConfig, Listener, ListenerError, SubscribeOptions, Topic,
};
use marquee_test::{FailingListener, PanickingListener, RecordingListener, init_test_logging};
use serde_json::json;

/// Splash screen: dismisses itself the first time the gate is passed.
struct Splash {
    dismissed: Arc<AtomicUsize>,
}

impl Splash {
    fn mount(bus: &EventBus) -> Self {
        let dismissed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&dismissed);
        bus.subscribe_topic_once::<AgeVerified, _>(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .unwrap();
        Self { dismissed }
    }

    fn dismissed(&self) -> usize {
        self.dismissed.load(Ordering::SeqCst)
    }
}

/// Analytics: keeps every typed verification it sees.
fn mount_analytics(bus: &EventBus) -> Arc<Mutex<Vec<AgeVerified>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    bus.subscribe_topic::<AgeVerified, _>(move |verified| {
        sink.lock().unwrap().push(verified);
        Ok(())
    })
    .unwrap();
    seen
}

#[test]
fn test_age_verified_reaches_every_controller() {
    init_test_logging();
    let bus = EventBus::new();

    let splash = Splash::mount(&bus);
    let header = RecordingListener::named("header");
    bus.subscribe_listener(
        AgeVerified::NAME,
        Arc::new(header.clone()),
        SubscribeOptions::default(),
    )
    .unwrap();
    let analytics = mount_analytics(&bus);

    let expires_at = Utc::now().checked_add_signed(Duration::days(30)).unwrap();
    let verified = AgeVerified {
        remember: true,
        expires_at: Some(expires_at),
    };

    let report = bus.publish_topic::<AgeVerified>(&verified).unwrap();
    assert_eq!(report.delivered, 3);
    assert_eq!(report.failed, 0);

    assert_eq!(splash.dismissed(), 1);
    assert_eq!(header.count(), 1);
    assert_eq!(header.last().unwrap()["remember"], json!(true));
    assert_eq!(*analytics.lock().unwrap(), vec![verified.clone()]);

    // Returning visitor re-verifies: splash is already gone.
    let report = bus.publish_topic::<AgeVerified>(&verified).unwrap();
    assert_eq!(report.delivered, 2);
    assert_eq!(splash.dismissed(), 1);
    assert_eq!(header.count(), 2);
    assert_eq!(analytics.lock().unwrap().len(), 2);
}

#[test]
fn test_broken_controller_does_not_break_the_page() {
    init_test_logging();
    let bus = EventBus::new();

    let failing = Arc::new(FailingListener::new("header markup missing"));
    let header = RecordingListener::named("nav");

    let shared: Arc<dyn Listener> = failing.clone();
    bus.subscribe_listener(AgeVerified::NAME, shared, SubscribeOptions::default())
        .unwrap();
    bus.subscribe_listener(
        AgeVerified::NAME,
        Arc::new(PanickingListener::new("carousel exploded")),
        SubscribeOptions::default(),
    )
    .unwrap();
    bus.subscribe_listener(
        AgeVerified::NAME,
        Arc::new(header.clone()),
        SubscribeOptions::default(),
    )
    .unwrap();

    let report = bus.publish(AgeVerified::NAME, json!({ "remember": false }));
    assert_eq!(report.failed, 2);
    assert_eq!(report.delivered, 1);
    assert_eq!(failing.calls(), 1);
    assert_eq!(header.count(), 1);

    // The bus is still usable after a listener panicked.
    let report = bus.publish(AgeVerified::NAME, json!({ "remember": true }));
    assert_eq!(report.invoked(), 3);
    assert_eq!(header.count(), 2);
}

#[test]
fn test_malformed_payload_fails_only_typed_listeners() {
    init_test_logging();
    let bus = EventBus::new();

    let analytics = mount_analytics(&bus);
    let raw = RecordingListener::named("raw");
    bus.subscribe_listener(
        AgeVerified::NAME,
        Arc::new(raw.clone()),
        SubscribeOptions::default(),
    )
    .unwrap();

    let report = bus.publish(AgeVerified::NAME, json!("not an object"));
    assert_eq!(report.failed, 1);
    assert_eq!(report.delivered, 1);
    assert!(analytics.lock().unwrap().is_empty());
    assert_eq!(raw.last(), Some(json!("not an object")));
}

#[test]
fn test_denied_visitor_is_redirected() {
    let bus = EventBus::new();
    let redirect = Arc::new(Mutex::new(None));
    let target = Arc::clone(&redirect);

    bus.subscribe_topic::<AgeDenied, _>(move |denied| {
        let url = denied
            .redirect_url
            .ok_or_else(|| ListenerError::failed("no redirect configured"))?;
        *target.lock().unwrap() = Some(url);
        Ok(())
    })
    .unwrap();

    let report = bus.publish_topic::<AgeDenied>(&AgeDenied { redirect_url: None }).unwrap();
    assert_eq!(report.failed, 1);
    assert!(redirect.lock().unwrap().is_none());

    bus.publish_topic::<AgeDenied>(&AgeDenied {
        redirect_url: Some("https://www.example.com/".to_owned()),
    })
    .unwrap();
    assert_eq!(
        redirect.lock().unwrap().as_deref(),
        Some("https://www.example.com/")
    );
}

#[test]
fn test_slider_reports_end_and_unsubscribes() {
    let bus = EventBus::new();
    let finished = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&finished);

    let id = bus
        .subscribe_topic::<SliderChanged, _>(move |change| {
            if change.is_last() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
            Ok(())
        })
        .unwrap();

    for index in 0..3 {
        bus.publish_topic::<SliderChanged>(&SliderChanged {
            slider: "gallery".to_owned(),
            index,
            total: 3,
        })
        .unwrap();
    }
    assert_eq!(finished.load(Ordering::SeqCst), 1);

    assert!(bus.unsubscribe_topic::<SliderChanged>(id));
    assert!(!bus.unsubscribe_topic::<SliderChanged>(id));
    assert!(bus.event_types().is_empty());
    assert_eq!(bus.debug_info(Some(SliderChanged::NAME)).events[SliderChanged::NAME], 0);
}

#[test]
fn test_history_tracks_page_activity() {
    let bus = EventBus::with_config(
        EventBusConfig::default()
            .with_history(true)
            .with_history_capacity(2),
    );

    bus.publish_topic::<OfflineStatus>(&OfflineStatus { online: false })
        .unwrap();
    bus.publish_topic::<OfflineStatus>(&OfflineStatus { online: true })
        .unwrap();
    bus.publish("tabs:changed", json!({ "group": "menu", "index": 1 }));

    let history = bus.event_history().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].event_name, OfflineStatus::NAME);
    assert_eq!(history[0].data, json!({ "online": true }));
    assert_eq!(history[1].event_name, "tabs:changed");
    assert!(history[0].timestamp <= history[1].timestamp);

    bus.clear_history();
    assert_eq!(bus.event_history().unwrap().len(), 0);
}

#[test]
fn test_publish_from_worker_threads() {
    let bus = EventBus::new();
    let header = RecordingListener::named("header");
    bus.subscribe_listener(
        OfflineStatus::NAME,
        Arc::new(header.clone()),
        SubscribeOptions::default(),
    )
    .unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let bus = bus.clone();
            thread::spawn(move || {
                bus.publish(OfflineStatus::NAME, json!({ "online": i % 2 == 0 }));
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(header.count(), 4);
}
