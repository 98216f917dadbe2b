//! Task assembly
//!
//! Task status is a pure function of the task's position relative to the
//! plan pointer. Steps are only synthesized for tasks at or before the pointer;
//! later tasks always have an empty step list.

use research_progress_sdk::{EventRecord, TaskDetail, TaskStatus};

use crate::config::StepScope;
use crate::observer::TransformObserver;
use crate::plan::TaskDescriptor;
use crate::steps::synthesize_steps;
use crate::utils::scalar_text;

pub fn task_status(index: usize, pointer: usize) -> TaskStatus {
    if index < pointer {
        TaskStatus::Completed
    } else if index == pointer {
        TaskStatus::InProgress
    } else {
        TaskStatus::Pending
    }
}

pub fn should_show_steps(index: usize, pointer: usize) -> bool {
    index <= pointer
}

/// Events that feed the steps of `task_id` under `scope`
pub fn scoped_events<'a>(
    scope: &StepScope,
    task_id: &str,
    events: &'a [EventRecord],
) -> Vec<&'a EventRecord> {
    match scope {
        StepScope::AllEvents => events.iter().collect(),
        StepScope::TaskField { field } => events
            .iter()
            .filter(|record| record_task_id_matches(record, field, task_id))
            .collect(),
    }
}

fn record_task_id_matches(record: &EventRecord, field: &str, task_id: &str) -> bool {
    record.iter().any(|event| {
        event
            .payload()
            .get(field)
            .and_then(scalar_text)
            .is_some_and(|id| id == task_id)
    })
}

pub fn assemble_tasks(
    plan: &[TaskDescriptor],
    pointer: usize,
    events: &[EventRecord],
    scope: &StepScope,
    observer: &dyn TransformObserver,
) -> Vec<TaskDetail> {
    plan.iter()
        .enumerate()
        .map(|(index, descriptor)| {
            let id = descriptor.id_or_default();
            let steps = if should_show_steps(index, pointer) {
                synthesize_steps(id, &scoped_events(scope, id, events))
            } else {
                Vec::new()
            };

            let task = TaskDetail {
                id: id.to_string(),
                description: descriptor.description_or_default().to_string(),
                status: task_status(index, pointer),
                steps,
            };
            observer.task_assembled(index, &task);
            task
        })
        .collect()
}
