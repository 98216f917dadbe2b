//! End-to-end transformation tests

use super::common::*;
use research_progress::config::StepScope;
use research_progress::{transform, ResearchTransformer};
use research_progress_sdk::{OverallStatus, StepKind, TaskStatus};
use serde_json::{json, Value};

// ============================================================================
// Empty and Minimal Inputs
// ============================================================================

#[test]
fn test_empty_input_serializes_to_bare_view() {
    let data = transform(&[], &[]);
    let value = serde_json::to_value(&data).unwrap();
    assert_eq!(
        value,
        json!({
            "planning": null,
            "tasks": [],
            "currentTaskId": null,
            "overallStatus": "planning",
        })
    );
}

#[test]
fn test_messages_do_not_change_output() {
    let events = full_pipeline_log();
    let without = transform(&events, &[]);
    let with = transform(&events, &[human("question"), assistant("m1", "answer")]);
    assert_eq!(without, with);
}

#[test]
fn test_unrecognized_categories_are_ignored() {
    let mut events = full_pipeline_log();
    let baseline = transform(&events, &[]);

    events.push(record(json!({"custom_node": {"anything": 1}, "__interrupt__": null})));
    assert_eq!(transform(&events, &[]), baseline);
}

// ============================================================================
// Full Pipeline
// ============================================================================

#[test]
fn test_full_pipeline_view() {
    let data = transform(&full_pipeline_log(), &[]);

    let planning = data.planning.as_ref().expect("planning info");
    assert_eq!(planning.total_tasks, 2);
    assert_eq!(planning.current_task_index, 1);
    assert_eq!(planning.tasks[0].id, "task-1");
    assert_eq!(planning.tasks[0].status, "pending");

    assert_eq!(data.current_task_id.as_deref(), Some("task-2"));
    assert_eq!(data.overall_status, OverallStatus::Researching);

    let statuses: Vec<TaskStatus> = data.tasks.iter().map(|t| t.status).collect();
    assert_eq!(statuses, vec![TaskStatus::Completed, TaskStatus::InProgress]);

    let kinds: Vec<StepKind> = data.tasks[0].steps.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StepKind::QueryGeneration,
            StepKind::WebResearch,
            StepKind::WebResearch,
            StepKind::Reflection,
            StepKind::ContentEnhancement,
            StepKind::Evaluation,
            StepKind::Completion,
        ]
    );
    assert_eq!(data.current_task().map(|t| t.id.as_str()), Some("task-2"));
}

#[test]
fn test_step_ids_are_stable_per_task() {
    let data = transform(&full_pipeline_log(), &[]);
    let ids: Vec<&str> = data.tasks[0].steps.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "task-1-query_generation",
            "task-1-web_research-0",
            "task-1-web_research-1",
            "task-1-reflection",
            "task-1-content_enhancement",
            "task-1-evaluation",
            "task-1-completion",
        ]
    );
}

#[test]
fn test_json_shape_of_a_step() {
    let data = transform(&full_pipeline_log(), &[]);
    let value = serde_json::to_value(&data).unwrap();
    let step = &value["tasks"][0]["steps"][0];

    assert_eq!(step["type"], json!("query_generation"));
    assert_eq!(step["status"], json!("completed"));
    assert_eq!(step["timestamp"], json!("2024-05-01T10:00:00Z"));
    assert_eq!(step["details"][0]["type"], json!("search_queries"));
    assert_eq!(
        step["details"][0]["content"],
        json!("perovskite efficiency 2024, tandem cell records")
    );
    // No timestamp in the payload, so the key is left out
    assert!(value["tasks"][0]["steps"][1].get("timestamp").is_none());
}

// ============================================================================
// Idempotence and Incremental Growth
// ============================================================================

#[test]
fn test_transform_is_idempotent() {
    let events = full_pipeline_log();
    let transformer = ResearchTransformer::new();
    let first = transformer.transform(&events, &[]);
    let second = transformer.transform(&events, &[]);
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_prefixes_of_the_log_grow_monotonically() {
    let events = full_pipeline_log();
    let mut previous_steps = 0;
    for end in 1..=events.len() {
        let data = transform(&events[..end], &[]);
        let steps = data.tasks.first().map_or(0, |t| t.steps.len());
        assert!(steps >= previous_steps, "prefix {} lost steps", end);
        previous_steps = steps;
    }
    assert_eq!(previous_steps, 7);
}

// ============================================================================
// Scoping
// ============================================================================

#[test]
fn test_task_field_scope_separates_tasks() {
    let events = records(vec![
        json!({"planner": {"plan": [{"id": "a"}, {"id": "b"}], "current_task_pointer": 1}}),
        json!({"web_research": {"task_id": "a", "search_query": "first"}}),
        json!({"web_research": {"task_id": "b", "search_query": "second"}}),
        json!({"web_research": {"task_id": "b", "search_query": "third"}}),
    ]);

    let global = transform(&events, &[]);
    assert_eq!(global.tasks[0].steps.len(), 3);
    assert_eq!(global.tasks[1].steps.len(), 3);

    let scoped = ResearchTransformer::new()
        .with_scope(StepScope::TaskField {
            field: "task_id".to_string(),
        })
        .transform(&events, &[]);
    let titles = |i: usize| -> Vec<String> {
        scoped.tasks[i].steps.iter().map(|s| s.title.clone()).collect()
    };
    assert_eq!(titles(0), vec!["first"]);
    assert_eq!(titles(1), vec!["second", "third"]);
    assert_eq!(scoped.tasks[1].steps[1].id, "b-web_research-1");
}

#[test]
fn test_step_data_is_raw_payload() {
    let payload: Value = json!({"search_query": "raw", "extra": [1, 2, 3]});
    let events = vec![
        planner_event(1, 0),
        record(json!({"web_research": payload.clone()})),
    ];
    let data = transform(&events, &[]);
    assert_eq!(data.tasks[0].steps[0].data, payload);
}
