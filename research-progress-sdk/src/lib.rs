//! Shared types for research progress views
//!
//! Input side: [`EventRecord`] and [`Message`], as streamed by the research
//! pipeline. Output side: [`ProcessedResearchData`], the task/step tree a
//! rendering layer consumes directly.

pub mod event;
pub mod message;

pub use event::{EventCategory, EventRecord, ResearchEvent};
pub use message::{latest_assistant_message, Message, MessageRole};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Free-form metadata attached to a step detail
pub type Metadata = Map<String, Value>;

/// Status of a planned research task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a single pipeline step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Pending,
    InProgress,
    Completed,
    Skipped,
}

/// Pipeline stage a step represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Planning,
    QueryGeneration,
    WebResearch,
    Reflection,
    ContentEnhancement,
    Evaluation,
    Completion,
}

impl StepKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StepKind::Planning => "planning",
            StepKind::QueryGeneration => "query_generation",
            StepKind::WebResearch => "web_research",
            StepKind::Reflection => "reflection",
            StepKind::ContentEnhancement => "content_enhancement",
            StepKind::Evaluation => "evaluation",
            StepKind::Completion => "completion",
        }
    }
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailKind {
    SearchQueries,
    Sources,
    Analysis,
    Decision,
}

/// Coarse status of the whole research run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Planning,
    Researching,
    Completed,
}

impl OverallStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OverallStatus::Planning => "planning",
            OverallStatus::Researching => "researching",
            OverallStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of structured information under a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepDetail {
    #[serde(rename = "type")]
    pub kind: DetailKind,
    pub content: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl StepDetail {
    pub fn new(kind: DetailKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
            metadata: Metadata::new(),
        }
    }

    /// Builder-style metadata insert
    pub fn with_meta(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.to_string(), value.into());
        self
    }
}

/// A pipeline step shown under a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Stable key for incremental re-rendering
    pub id: String,
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub title: String,
    pub status: StepStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Raw payload the step was synthesized from
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub details: Vec<StepDetail>,
}

/// A planned task with the steps synthesized for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDetail {
    pub id: String,
    pub description: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// Flattened plan entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub id: String,
    pub description: String,
    /// Coarse status string as published by the planner
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanningInfo {
    pub total_tasks: usize,
    pub current_task_index: usize,
    pub tasks: Vec<PlanSummary>,
}

/// The complete view model handed to the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedResearchData {
    pub planning: Option<PlanningInfo>,
    pub tasks: Vec<TaskDetail>,
    pub current_task_id: Option<String>,
    pub overall_status: OverallStatus,
}

impl ProcessedResearchData {
    pub fn task(&self, id: &str) -> Option<&TaskDetail> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn current_task(&self) -> Option<&TaskDetail> {
        self.current_task_id.as_deref().and_then(|id| self.task(id))
    }
}
