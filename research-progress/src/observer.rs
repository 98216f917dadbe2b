//! Observability hook for the transform
//!
//! The transform reports what it built through a [`TransformObserver`]. The
//! default observer does nothing; [`TracingObserver`] forwards everything to
//! `tracing` as structured events.

use research_progress_sdk::{Message, PlanningInfo, ProcessedResearchData, TaskDetail};

use crate::snapshot::StateSnapshot;
use crate::summary::log_summary;

/// Callbacks invoked while a view is being built. All methods default to no-ops.
pub trait TransformObserver: Send + Sync {
    fn snapshot_built(&self, _event_count: usize, _snapshot: &StateSnapshot) {}

    fn assistant_message_located(&self, _message: &Message) {}

    fn planning_extracted(&self, _planning: Option<&PlanningInfo>) {}

    fn task_assembled(&self, _index: usize, _task: &TaskDetail) {}

    fn transform_finished(&self, _result: &ProcessedResearchData) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl TransformObserver for NoopObserver {}

/// Emits debug-level events while building and an info-level summary at the end
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl TransformObserver for TracingObserver {
    fn snapshot_built(&self, event_count: usize, snapshot: &StateSnapshot) {
        tracing::debug!(
            events = event_count,
            state_keys = snapshot.len(),
            has_plan = snapshot.has_plan(),
            "State snapshot built"
        );
    }

    fn assistant_message_located(&self, message: &Message) {
        tracing::debug!(message_id = ?message.id, "Latest assistant message located");
    }

    fn planning_extracted(&self, planning: Option<&PlanningInfo>) {
        match planning {
            Some(info) => tracing::debug!(
                total_tasks = info.total_tasks,
                current_task_index = info.current_task_index,
                "Planning info extracted"
            ),
            None => tracing::debug!("No planning signal in event log"),
        }
    }

    fn task_assembled(&self, index: usize, task: &TaskDetail) {
        tracing::debug!(
            index,
            task_id = %task.id,
            status = %task.status,
            steps = task.steps.len(),
            "Task assembled"
        );
    }

    fn transform_finished(&self, result: &ProcessedResearchData) {
        log_summary(result);
    }
}
