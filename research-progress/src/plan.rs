//! Research plan extraction
//!
//! The planner publishes `plan` (an ordered list of task descriptors) and
//! `current_task_pointer` into the shared state. Both are read back from the
//! accumulated [`StateSnapshot`].

use research_progress_sdk::{EventCategory, EventRecord, PlanSummary, PlanningInfo};
use serde_json::Value;

use crate::snapshot::StateSnapshot;
use crate::utils::{get_str, get_text};

pub const UNKNOWN_TASK_ID: &str = "unknown";
pub const UNKNOWN_TASK_DESCRIPTION: &str = "Unknown task";
pub const DEFAULT_PLAN_STATUS: &str = "pending";

/// One entry of the published plan, as found. Missing fields stay `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDescriptor {
    pub id: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

impl TaskDescriptor {
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: get_text(value, "id"),
            description: get_str(value, "description").map(str::to_string),
            status: get_str(value, "status").map(str::to_string),
        }
    }

    pub fn id_or_default(&self) -> &str {
        self.id.as_deref().unwrap_or(UNKNOWN_TASK_ID)
    }

    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(UNKNOWN_TASK_DESCRIPTION)
    }

    pub fn status_or_default(&self) -> &str {
        self.status.as_deref().unwrap_or(DEFAULT_PLAN_STATUS)
    }
}

/// Plan entries from the snapshot, in plan order
pub fn read_plan(snapshot: &StateSnapshot) -> Vec<TaskDescriptor> {
    snapshot.plan().iter().map(TaskDescriptor::from_value).collect()
}

/// Whether any record comes from a planning node
pub fn has_planning_signal(events: &[EventRecord]) -> bool {
    events.iter().any(|record| {
        record
            .iter()
            .filter_map(|event| event.category())
            .any(EventCategory::is_planning)
    })
}

/// Planning overview, or `None` when nothing indicates that planning happened
pub fn extract_planning(events: &[EventRecord], snapshot: &StateSnapshot) -> Option<PlanningInfo> {
    if !has_planning_signal(events) && !snapshot.has_plan() {
        return None;
    }

    let tasks: Vec<PlanSummary> = read_plan(snapshot)
        .iter()
        .map(|task| PlanSummary {
            id: task.id_or_default().to_string(),
            description: task.description_or_default().to_string(),
            status: task.status_or_default().to_string(),
        })
        .collect();

    Some(PlanningInfo {
        total_tasks: tasks.len(),
        current_task_index: snapshot.current_task_pointer(),
        tasks,
    })
}
