//! Current task and overall pipeline status

use research_progress_sdk::{EventCategory, EventRecord, OverallStatus};

use crate::plan::TaskDescriptor;

/// Id of the plan entry at `pointer`, or `None` when the pointer is past the plan
pub fn current_task_id(plan: &[TaskDescriptor], pointer: usize) -> Option<String> {
    plan.get(pointer).map(|task| task.id_or_default().to_string())
}

/// A terminal `finalize_answer` wins over any planner activity in the same log.
pub fn overall_status(events: &[EventRecord]) -> OverallStatus {
    if events
        .iter()
        .any(|record| record.contains(EventCategory::FinalizeAnswer))
    {
        OverallStatus::Completed
    } else if events
        .iter()
        .any(|record| record.contains_any(&[EventCategory::Planner, EventCategory::PlannerNode]))
    {
        OverallStatus::Researching
    } else {
        OverallStatus::Planning
    }
}
