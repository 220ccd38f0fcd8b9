use common::{ExecutionContext, LoggingConfig, OperationTimer, StructuredLogEntry};
use serde_json::Value;
use std::collections::HashMap;
use tracing::Level;

#[test]
fn test_entry_flattens_fields() {
    let mut fields = HashMap::new();
    fields.insert("task_id".to_string(), Value::String("t1".to_string()));
    fields.insert("created".to_string(), Value::Bool(true));

    let entry = StructuredLogEntry {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: "INFO".to_string(),
        target: "application::workspace".to_string(),
        message: "Saved".to_string(),
        fields,
        context: None,
        duration_ms: None,
    };

    let json: Value = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["task_id"], "t1");
    assert_eq!(json["created"], true);
    assert!(json.get("context").is_none());
    assert!(json.get("duration_ms").is_none());
}

#[test]
fn test_entry_parses_back() {
    let line = r#"{"timestamp":"2024-03-10T08:00:00Z","level":"WARN","target":"board","message":"Board and store disagreed","task_id":"t9","duration_ms":12}"#;
    let entry: StructuredLogEntry = serde_json::from_str(line).unwrap();

    assert_eq!(entry.level, "WARN");
    assert_eq!(entry.duration_ms, Some(12));
    assert_eq!(entry.fields.get("task_id"), Some(&Value::String("t9".into())));
}

#[test]
fn test_execution_context_defaults() {
    let context = ExecutionContext::default();
    assert_eq!(context.pid, std::process::id());
    assert!(!context.app_version.is_empty());
    assert!(!context.hostname.is_empty());
}

#[test]
fn test_logging_config_builders() {
    let config = LoggingConfig::default().with_level_str("WARN").json(true);
    assert_eq!(config.level, Level::WARN);
    assert!(config.json_output);
    assert!(config.include_context);
}

#[test]
fn test_operation_timer_measures() {
    let mut timer = OperationTimer::new("chatbot");
    timer.add_field("messages", 3);
    std::thread::sleep(std::time::Duration::from_millis(5));
    assert!(timer.elapsed_ms() >= 5);

    let result: Result<u32, String> = Ok(1);
    timer.finish_with_result(&result);
}
