//! Compact diagnostic view of a transform result

use research_progress_sdk::{OverallStatus, ProcessedResearchData, TaskStatus};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskSummary {
    pub id: String,
    pub status: TaskStatus,
    pub step_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResearchSummary {
    pub overall_status: OverallStatus,
    pub current_task_id: Option<String>,
    pub total_tasks: usize,
    pub tasks: Vec<TaskSummary>,
}

pub fn summarize(data: &ProcessedResearchData) -> ResearchSummary {
    ResearchSummary {
        overall_status: data.overall_status,
        current_task_id: data.current_task_id.clone(),
        total_tasks: data.tasks.len(),
        tasks: data
            .tasks
            .iter()
            .map(|task| TaskSummary {
                id: task.id.clone(),
                status: task.status,
                step_count: task.steps.len(),
            })
            .collect(),
    }
}

fn status_marker(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Completed => "✓",
        TaskStatus::InProgress => "→",
        TaskStatus::Pending => "·",
    }
}

impl fmt::Display for ResearchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Research {} ({} tasks", self.overall_status, self.total_tasks)?;
        if let Some(current) = &self.current_task_id {
            write!(f, ", current: {}", current)?;
        }
        writeln!(f, ")")?;

        for task in &self.tasks {
            writeln!(
                f,
                "  {} {} [{}] {} steps",
                status_marker(task.status),
                task.id,
                task.status,
                task.step_count
            )?;
        }
        Ok(())
    }
}

/// Emit the summary as one info event plus one debug event per task
pub fn log_summary(data: &ProcessedResearchData) {
    let summary = summarize(data);
    tracing::info!(
        overall_status = %summary.overall_status,
        current_task_id = ?summary.current_task_id,
        total_tasks = summary.total_tasks,
        "Research view updated"
    );
    for task in &summary.tasks {
        tracing::debug!(
            task_id = %task.id,
            status = %task.status,
            steps = task.step_count,
            "Task summary"
        );
    }
}
