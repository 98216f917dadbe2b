//! Event log to view model
//!
//! [`ResearchTransformer`] composes the pieces: the snapshot feeds the plan and
//! the pointer, the task assembler re-scans the log per visible task, and the
//! status resolver scans the log on its own. The result depends only on the
//! inputs, so re-running on the same log yields an equal view.

use research_progress_sdk::{latest_assistant_message, EventRecord, Message, ProcessedResearchData};

use crate::config::{ProgressConfig, StepScope};
use crate::observer::{NoopObserver, TransformObserver};
use crate::plan::{extract_planning, read_plan};
use crate::snapshot::StateSnapshot;
use crate::status::{current_task_id, overall_status};
use crate::tasks::assemble_tasks;

pub struct ResearchTransformer {
    scope: StepScope,
    observer: Box<dyn TransformObserver>,
}

impl Default for ResearchTransformer {
    fn default() -> Self {
        Self::new()
    }
}

impl ResearchTransformer {
    pub fn new() -> Self {
        Self {
            scope: StepScope::default(),
            observer: Box::new(NoopObserver),
        }
    }

    pub fn from_config(config: &ProgressConfig) -> Self {
        Self::new().with_scope(config.step_scope.clone())
    }

    pub fn with_scope(mut self, scope: StepScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_observer(mut self, observer: impl TransformObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn scope(&self) -> &StepScope {
        &self.scope
    }

    pub fn transform(&self, events: &[EventRecord], messages: &[Message]) -> ProcessedResearchData {
        let observer = self.observer.as_ref();

        let snapshot = StateSnapshot::accumulate(events);
        observer.snapshot_built(events.len(), &snapshot);

        // Located for observers only; no output field depends on it.
        if let Some(message) = latest_assistant_message(messages) {
            observer.assistant_message_located(message);
        }

        let planning = extract_planning(events, &snapshot);
        observer.planning_extracted(planning.as_ref());

        let plan = read_plan(&snapshot);
        let pointer = snapshot.current_task_pointer();
        let tasks = assemble_tasks(&plan, pointer, events, &self.scope, observer);

        let result = ProcessedResearchData {
            planning,
            tasks,
            current_task_id: current_task_id(&plan, pointer),
            overall_status: overall_status(events),
        };
        observer.transform_finished(&result);
        result
    }
}

/// Transform with the default scope and no observer
pub fn transform(events: &[EventRecord], messages: &[Message]) -> ProcessedResearchData {
    ResearchTransformer::new().transform(events, messages)
}
