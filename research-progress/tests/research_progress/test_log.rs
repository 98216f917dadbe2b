//! Loading event logs and configuration from disk

use research_progress::config::{OutputFormat, ProgressConfig, StepScope};
use research_progress::error::LogError;
use research_progress::log::{load_events, load_events_from_str, load_messages, read_log};
use research_progress::transform;
use research_progress_sdk::{EventCategory, OverallStatus};
use std::io::Write;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_jsonl_file_and_transform() {
    let file = write_temp(concat!(
        "{\"planner\": {\"plan\": [{\"id\": \"1\", \"description\": \"A\"}], \"current_task_pointer\": 0}}\n",
        "{\"web_research\": {\"search_query\": \"q\", \"sources_gathered\": [{\"value\": \"https://x.org\"}]}}\n",
        "\n",
        "{\"finalize_answer\": {}}\n",
    ));

    let events = load_events(file.path()).unwrap();
    assert_eq!(events.len(), 3);

    let data = transform(&events, &[]);
    assert_eq!(data.overall_status, OverallStatus::Completed);
    assert_eq!(data.tasks[0].steps.len(), 1);
}

#[test]
fn test_load_json_array_file() {
    let file = write_temp(r#"[{"planning": {"plan": []}}, {"reflection": {"is_sufficient": true}}]"#);
    let events = load_events(file.path()).unwrap();
    assert!(events[0].contains(EventCategory::Planning));
    assert!(events[1].contains(EventCategory::Reflection));
}

#[test]
fn test_invalid_line_in_file() {
    let file = write_temp("{\"planner\": {}}\n{\"reflection\": \n");
    match load_events(file.path()) {
        Err(LogError::InvalidLine { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected invalid line error, got {:?}", other),
    }
}

#[test]
fn test_load_messages_file() {
    let file = write_temp(r#"[{"type": "human", "content": "q"}, {"type": "assistant", "id": "a1", "content": "r"}]"#);
    let messages = load_messages(file.path()).unwrap();
    assert_eq!(messages.len(), 2);
    assert!(messages[1].is_assistant());
}

#[tokio::test]
async fn test_async_read_matches_sync_load() {
    let file = write_temp("{\"planner\": {\"plan\": []}}\n{\"finalize_answer\": {}}\n");
    let sync = load_events(file.path()).unwrap();
    let text = read_log(file.path()).await.unwrap();
    assert_eq!(sync, load_events_from_str(&text).unwrap());

    let missing = read_log(std::path::Path::new("/nonexistent/events.jsonl")).await;
    assert!(matches!(missing, Err(LogError::Io { .. })));
}

#[test]
fn test_load_config_file() {
    let file = write_temp("step_scope:\n  mode: task_field\n  field: node_task\noutput:\n  format: yaml\n");
    let config = ProgressConfig::load(file.path()).unwrap();
    assert_eq!(
        config.step_scope,
        StepScope::TaskField {
            field: "node_task".to_string()
        }
    );
    assert_eq!(config.output.format, OutputFormat::Yaml);
    assert_eq!(config.follow.poll_interval_ms, 500);
}
