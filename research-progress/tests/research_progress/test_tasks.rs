//! Task status and step visibility across plan positions

use super::common::*;
use research_progress::transform;
use research_progress_sdk::{StepKind, TaskStatus};
use serde_json::json;

#[test]
fn test_status_sequence_for_every_plan_position() {
    for n in 0..6usize {
        for p in 0..8usize {
            let data = transform(&[planner_event(n, p)], &[]);
            let statuses: Vec<TaskStatus> = data.tasks.iter().map(|t| t.status).collect();

            let completed = p.min(n);
            let mut expected = vec![TaskStatus::Completed; completed];
            if p < n {
                expected.push(TaskStatus::InProgress);
            }
            expected.resize(n, TaskStatus::Pending);

            assert_eq!(statuses, expected, "n={} p={}", n, p);
            assert_eq!(
                data.current_task_id,
                (p < n).then(|| (p + 1).to_string()),
                "n={} p={}",
                n,
                p
            );
        }
    }
}

#[test]
fn test_web_research_step_count_matches_events() {
    for count in 0..5usize {
        let mut events = vec![planner_event(3, 1)];
        for i in 0..count {
            events.push(record(json!({"web_research": {"search_query": format!("q{}", i)}})));
        }

        let data = transform(&events, &[]);
        for (index, task) in data.tasks.iter().enumerate() {
            let web_steps = task
                .steps
                .iter()
                .filter(|s| s.kind == StepKind::WebResearch)
                .count();
            let expected = if index <= 1 { count } else { 0 };
            assert_eq!(web_steps, expected, "count={} task={}", count, index);
        }
    }
}

#[test]
fn test_pending_tasks_have_no_steps() {
    let mut events = full_pipeline_log();
    events[0] = planner_event(4, 0);
    events.truncate(events.len() - 1);

    let data = transform(&events, &[]);
    assert_eq!(data.tasks[0].status, TaskStatus::InProgress);
    assert!(!data.tasks[0].steps.is_empty());
    assert!(data.tasks[1..].iter().all(|t| t.steps.is_empty()));
}

#[test]
fn test_plan_entries_with_missing_fields() {
    let events = records(vec![json!({"planner": {
        "plan": [{"description": "No id"}, {"id": 7}, "not an object"],
        "current_task_pointer": 2,
    }})]);
    let data = transform(&events, &[]);

    let ids: Vec<&str> = data.tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["unknown", "7", "unknown"]);
    assert_eq!(data.tasks[0].description, "No id");
    assert_eq!(data.tasks[1].description, "Unknown task");
    assert_eq!(data.tasks[2].status, TaskStatus::InProgress);
    assert_eq!(data.current_task_id.as_deref(), Some("unknown"));
}

#[test]
fn test_later_pointer_overrides_earlier() {
    let events = vec![
        planner_event(3, 0),
        record(json!({"record_task_completion": {"current_task_pointer": 2}})),
    ];
    let data = transform(&events, &[]);
    assert_eq!(data.planning.unwrap().current_task_index, 2);
    assert_eq!(data.tasks[2].status, TaskStatus::InProgress);
    assert_eq!(data.current_task_id.as_deref(), Some("3"));
}

#[test]
fn test_missing_pointer_defaults_to_first_task() {
    let events = records(vec![json!({"planning": {"plan": [{"id": "only"}]}})]);
    let data = transform(&events, &[]);
    assert_eq!(data.tasks[0].status, TaskStatus::InProgress);
    assert_eq!(data.planning.unwrap().current_task_index, 0);
}
