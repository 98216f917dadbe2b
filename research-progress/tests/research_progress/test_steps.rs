//! Step synthesis from realistic pipeline payloads

use super::common::*;
use research_progress::steps::web_research::NormalizedSource;
use research_progress::transform;
use research_progress_sdk::{DetailKind, Step, StepKind, StepStatus};
use serde_json::json;

fn first_task_steps() -> Vec<Step> {
    let data = transform(&full_pipeline_log(), &[]);
    data.tasks[0].steps.clone()
}

fn step_of(steps: &[Step], kind: StepKind) -> &Step {
    steps.iter().find(|s| s.kind == kind).expect("step present")
}

// ============================================================================
// Web Research
// ============================================================================

#[test]
fn test_source_with_only_value_is_normalized() {
    let source = NormalizedSource::from_value(&json!({"value": "https://x.org"}));
    assert_eq!(
        serde_json::to_value(&source).unwrap(),
        json!({
            "title": "Source",
            "url": "https://x.org",
            "label": "Web",
            "snippet": "No preview available",
        })
    );
}

#[test]
fn test_web_research_steps() {
    let steps = first_task_steps();
    let web: Vec<&Step> = steps.iter().filter(|s| s.kind == StepKind::WebResearch).collect();
    assert_eq!(web.len(), 2);

    assert_eq!(web[0].title, "perovskite efficiency 2024");
    assert_eq!(web[0].details[0].kind, DetailKind::SearchQueries);
    assert_eq!(web[0].details[1].kind, DetailKind::Sources);
    assert_eq!(web[0].details[1].content, "Found 2 sources");
    assert_eq!(
        web[0].details[1].metadata["sources"],
        json!([
            {"title": "NREL chart", "url": "https://nrel.gov/chart", "label": "NREL", "snippet": "Best research-cell efficiencies"},
            {"title": "Source", "url": "https://x.org/1", "label": "Web", "snippet": "No preview available"},
        ])
    );

    assert_eq!(web[1].title, "tandem cell records");
    assert_eq!(web[1].details[1].content, "Found 0 sources");
}

#[test]
fn test_web_research_without_any_query() {
    let events = vec![planner_event(1, 0), record(json!({"web_research": {}}))];
    let data = transform(&events, &[]);
    assert_eq!(data.tasks[0].steps[0].title, "Unknown Query");
}

// ============================================================================
// Reflection, Enhancement, Evaluation
// ============================================================================

#[test]
fn test_reflection_details() {
    let steps = first_task_steps();
    let reflection = step_of(&steps, StepKind::Reflection);

    let contents: Vec<&str> = reflection.details.iter().map(|d| d.content.as_str()).collect();
    assert_eq!(
        contents,
        vec![
            "Additional information needed to answer the research question",
            "Knowledge gap: No long-term stability data",
            "Generated 1 follow-up queries",
        ]
    );
    assert_eq!(reflection.details[2].kind, DetailKind::Decision);
    assert_eq!(reflection.details[2].metadata["action_needed"], json!(true));
}

#[test]
fn test_skipped_no_api_is_completed_with_message() {
    let steps = first_task_steps();
    let enhancement = step_of(&steps, StepKind::ContentEnhancement);
    assert_eq!(enhancement.title, "Content Enhancement Analysis");
    assert_eq!(enhancement.status, StepStatus::Completed);
    assert_eq!(
        enhancement.details[0].content,
        "Content enhancement skipped - no API key"
    );
}

#[test]
fn test_enhancement_not_needed_is_skipped() {
    let events = vec![
        planner_event(1, 0),
        record(json!({"content_enhancement": {"enhancement_status": "skipped"}})),
    ];
    let data = transform(&events, &[]);
    assert_eq!(data.tasks[0].steps[0].status, StepStatus::Skipped);
}

#[test]
fn test_evaluation_reads_prefixed_fields() {
    let steps = first_task_steps();
    let evaluation = step_of(&steps, StepKind::Evaluation);
    assert_eq!(evaluation.details[0].content, "Research quality meets the requirements");
    assert_eq!(evaluation.details[0].metadata["quality_score"], json!(0.82));
    assert_eq!(evaluation.details[1].content, "Covers the main efficiency milestones");
}

// ============================================================================
// Latest-wins Stages
// ============================================================================

#[test]
fn test_single_value_stages_use_latest_event() {
    let events = vec![
        planner_event(1, 0),
        record(json!({"reflection": {"is_sufficient": false}})),
        record(json!({"generate_query": {"query_list": ["old"]}})),
        record(json!({"reflection": {"is_sufficient": true}})),
        record(json!({"generate_query": {"query_list": ["new"]}})),
    ];
    let data = transform(&events, &[]);
    let steps = &data.tasks[0].steps;

    assert_eq!(steps.len(), 2);
    assert_eq!(steps[0].kind, StepKind::QueryGeneration);
    assert_eq!(steps[0].details[0].content, "new");
    assert_eq!(
        steps[1].details[0].content,
        "Information is sufficient to answer the research question"
    );
}

#[test]
fn test_completion_has_no_details() {
    let steps = first_task_steps();
    let completion = step_of(&steps, StepKind::Completion);
    assert_eq!(completion.title, "Task Completed");
    assert!(completion.details.is_empty());
}
