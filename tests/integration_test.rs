//! Collector integration tests
//!
//! These cover the full path from a config file on disk to harvested,
//! serialized error events.

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use apm_errors::{
    config::{ensure_config_file_exists, AgentConfig},
    ApmError, AttributeValue, ErrorCollector, NoticeOutcome, StandardError, Traced,
};
use serde_json::Value;

/// Helper function to create a config file exercising every rule
fn create_test_config(dir: &Path) -> std::io::Result<()> {
    let config_content = r#"# Collector integration test configuration
[error_collector]
max_error_events = 3
class_naming = "short"
ignore_classes = ["NotFound"]
ignore_messages = ["^canceled"]
expected_classes = ["Validation"]

[attributes]
max_attributes = 2
max_value_bytes = 8
"#;

    fs::write(dir.join("apm-errors.toml"), config_content)
}

#[test]
fn config_file_drives_collector() {
    let temp_dir = TempDir::new().unwrap();
    create_test_config(temp_dir.path()).unwrap();

    let config = AgentConfig::load_with_validation(temp_dir.path().join("apm-errors.toml")).unwrap();
    let collector = ErrorCollector::new(config).unwrap();

    let outcomes = vec![
        collector.notice_error(&StandardError::new("missing").with_class("NotFound")),
        collector.notice_error(&StandardError::new("canceled by user")),
        collector.notice_error(
            &StandardError::new("bad input")
                .with_class("Validation")
                .with_attribute("field", "email-address-too-long")
                .with_attribute("attempt", 2)
                .with_attribute("zzz", "cut by limit"),
        ),
        collector.notice_plain(&std::io::Error::new(std::io::ErrorKind::Other, "disk full")),
        collector.notice_error(&StandardError::new("third")),
        collector.notice_error(&StandardError::new("overflow")),
    ];
    let outcomes: Vec<NoticeOutcome> = outcomes.into_iter().map(Result::unwrap).collect();
    assert_eq!(
        outcomes,
        vec![
            NoticeOutcome::Ignored,
            NoticeOutcome::Ignored,
            NoticeOutcome::Recorded,
            NoticeOutcome::Recorded,
            NoticeOutcome::Recorded,
            NoticeOutcome::Dropped,
        ]
    );

    let harvest = collector.harvest();
    assert_eq!(harvest.seen, 6);
    assert_eq!(harvest.ignored, 2);
    assert_eq!(harvest.dropped, 1);

    let validation = &harvest.events[0];
    assert!(validation.expected);
    assert_eq!(validation.attributes.len(), 2);
    assert_eq!(validation.attributes.get("attempt"), Some(&AttributeValue::Int(2)));
    assert_eq!(
        validation.attributes.get("field"),
        Some(&AttributeValue::from("email-ad"))
    );

    assert_eq!(harvest.events[1].class, "Error");
    assert_eq!(harvest.events[2].class, "StandardError");
}

#[test]
fn harvest_serializes_events() {
    let collector = ErrorCollector::new(AgentConfig::default()).unwrap();
    collector
        .notice_error(
            &StandardError::new("error message: something went very wrong")
                .with_class("errors are aggregated by class")
                .with_attribute("important_number", 97232)
                .with_attribute("relevant_string", "zap"),
        )
        .unwrap();

    let json = collector.harvest().to_json(false).unwrap();
    let value: Value = serde_json::from_str(&json).unwrap();
    let event = &value["events"][0];

    assert_eq!(event["type"], "TransactionError");
    assert_eq!(event["error.class"], "errors are aggregated by class");
    assert_eq!(event["error.message"], "error message: something went very wrong");
    assert_eq!(event["userAttributes"]["important_number"], 97232);
    assert_eq!(event["userAttributes"]["relevant_string"], "zap");
    assert!(event.get("stackTrace").is_none());
    assert!(event["timestamp"].as_i64().unwrap() > 0);
}

#[test]
fn traced_error_carries_stack_into_event() {
    let collector = ErrorCollector::new(AgentConfig::default()).unwrap();
    collector
        .notice_error(&Traced::new(StandardError::new("with stack").with_class("Traced")))
        .unwrap();

    let harvest = collector.harvest();
    let event = &harvest.events[0];
    assert_eq!(event.class, "Traced");
    assert!(!event.stack_trace.is_empty());
    assert_eq!(event.stack_trace.resolve().len(), event.stack_trace.len());
}

#[test]
fn generated_template_is_loadable() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("apm-errors.toml");

    assert!(ensure_config_file_exists(&path, false).unwrap());
    let config = AgentConfig::load_with_validation(&path).unwrap();
    assert_eq!(config, AgentConfig::default());
}

#[test]
fn disabled_collection_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("off.toml");
    fs::write(&path, "[error_collector]\nenabled = false\n").unwrap();

    let collector = ErrorCollector::new(AgentConfig::load_with_validation(&path).unwrap()).unwrap();
    let err = collector.notice_error(&StandardError::new("x")).unwrap_err();

    assert!(matches!(err, ApmError::Disabled));
    assert!(err.user_message().contains("enabled = false"));
}
