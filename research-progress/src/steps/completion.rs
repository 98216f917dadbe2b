//! Task completion marker

use research_progress_sdk::{EventCategory, EventRecord, Step, StepKind};

use super::{latest_payload, new_step, step_id};

pub const TITLE: &str = "Task Completed";

pub fn synthesize(task_id: &str, events: &[&EventRecord]) -> Option<Step> {
    let payload = latest_payload(events, EventCategory::RecordTaskCompletion)?;
    Some(new_step(step_id(task_id, StepKind::Completion), StepKind::Completion, TITLE, payload))
}
