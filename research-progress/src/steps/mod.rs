//! Step synthesis
//!
//! Each submodule turns the events of one pipeline stage into a [`Step`].
//! Stages are emitted in a fixed order regardless of when their events
//! arrived:
//!
//! 1. Query generation (latest event)
//! 2. Web research (one step per event, in arrival order)
//! 3. Reflection (latest event)
//! 4. Content enhancement (latest event)
//! 5. Evaluation (latest event)
//! 6. Completion (latest event)
//!
//! A stage with no events produces no step.

pub mod completion;
pub mod enhancement;
pub mod evaluation;
pub mod query_generation;
pub mod reflection;
pub mod web_research;

use research_progress_sdk::{EventCategory, EventRecord, Step, StepKind, StepStatus};
use serde_json::Value;

use crate::utils::get_timestamp;

/// Synthesize the step list for one task from the given events
pub fn synthesize_steps(task_id: &str, events: &[&EventRecord]) -> Vec<Step> {
    let mut steps = Vec::new();
    steps.extend(query_generation::synthesize(task_id, events));
    steps.extend(web_research::synthesize(task_id, events));
    steps.extend(reflection::synthesize(task_id, events));
    steps.extend(enhancement::synthesize(task_id, events));
    steps.extend(evaluation::synthesize(task_id, events));
    steps.extend(completion::synthesize(task_id, events));
    steps
}

/// Payload of the latest record carrying `category`
pub(crate) fn latest_payload<'a>(
    events: &[&'a EventRecord],
    category: EventCategory,
) -> Option<&'a Value> {
    events.iter().rev().find_map(|record| record.get(category))
}

/// Payloads of every record carrying `category`, in arrival order
pub(crate) fn all_payloads<'a>(
    events: &[&'a EventRecord],
    category: EventCategory,
) -> Vec<&'a Value> {
    events
        .iter()
        .filter_map(|record| record.get(category))
        .collect()
}

/// New completed step with no details
pub(crate) fn new_step(id: String, kind: StepKind, title: impl Into<String>, payload: &Value) -> Step {
    Step {
        id,
        kind,
        title: title.into(),
        status: StepStatus::Completed,
        timestamp: get_timestamp(payload),
        data: payload.clone(),
        details: Vec::new(),
    }
}

pub(crate) fn step_id(task_id: &str, kind: StepKind) -> String {
    format!("{}-{}", task_id, kind)
}
