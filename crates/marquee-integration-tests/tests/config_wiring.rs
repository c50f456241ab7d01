//! Integration tests for building the bus and logging from configuration.

use std::collections::HashMap;

use marquee_config::loader::load_with_env;
use marquee_config::{Config, ConfigError, ConfigLayer, HistoryMode};
use marquee_events::EventBus;
use marquee_telemetry::{LogConfig, LogFormat};
use marquee_test::test_config_file;
use serde_json::json;

#[test]
fn test_config_file_drives_bus_and_logging() {
    let file = test_config_file(
        r#"
[events]
history = "enabled"
history_capacity = 3

[logging]
level = "debug"
format = "json"
directives = ["marquee_events=trace"]
"#,
    );

    let resolved = load_with_env(Some(file.path()), &HashMap::new()).unwrap();
    assert_eq!(resolved.loaded_files.len(), 1);

    let bus = EventBus::from_config(&resolved.config.events);
    assert!(bus.history_enabled());
    for n in 0..5 {
        bus.publish("slider:changed", json!({ "slider": "hero", "index": n, "total": 5 }));
    }
    let history = bus.event_history().unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].data["index"], json!(2));

    let log = LogConfig::try_from(&resolved.config.logging).unwrap();
    assert_eq!(log.level, "debug");
    assert_eq!(log.format, LogFormat::Json);
    assert_eq!(log.directives, vec!["marquee_events=trace"]);
}

#[test]
fn test_env_fills_gaps_left_by_file() {
    let file = test_config_file("[events]\nhistory = \"disabled\"\n");
    let env: HashMap<String, String> = [
        ("MARQUEE_EVENT_HISTORY", "enabled"),
        ("MARQUEE_LOG_FORMAT", "compact"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect();

    let resolved = load_with_env(Some(file.path()), &env).unwrap();

    // The file set history, so the env var is ignored for it.
    assert_eq!(resolved.config.events.history, HistoryMode::Disabled);
    assert!(!EventBus::from_config(&resolved.config.events).history_enabled());

    assert_eq!(resolved.config.logging.format, "compact");
    assert_eq!(
        resolved.source_of("logging.format"),
        Some(&ConfigLayer::Environment)
    );

    let log = LogConfig::try_from(&resolved.config.logging).unwrap();
    assert_eq!(log.format, LogFormat::Compact);
}

#[test]
fn test_defaults_follow_build_profile() {
    let resolved = load_with_env(None, &HashMap::new()).unwrap();
    assert_eq!(resolved.config, Config::default());
    assert!(resolved.loaded_files.is_empty());

    let bus = EventBus::from_config(&resolved.config.events);
    assert_eq!(bus.history_enabled(), cfg!(debug_assertions));
}

#[test]
fn test_invalid_capacity_is_rejected() {
    let file = test_config_file("[events]\nhistory_capacity = 0\n");
    let err = load_with_env(Some(file.path()), &HashMap::new()).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { field: "events.history_capacity", .. }));
}
