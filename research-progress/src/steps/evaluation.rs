//! Research quality evaluation step

use research_progress_sdk::{DetailKind, EventCategory, EventRecord, Step, StepDetail, StepKind};
use serde_json::Value;

use super::{latest_payload, new_step, step_id};
use crate::utils::first_present;

pub const TITLE: &str = "Evaluating Research Quality";
pub const MEETS_REQUIREMENTS: &str = "Research quality meets the requirements";
pub const NEEDS_IMPROVEMENT: &str = "Research quality needs improvement";

pub fn synthesize(task_id: &str, events: &[&EventRecord]) -> Option<Step> {
    let payload = latest_payload(events, EventCategory::EvaluateResearchEnhanced)?;

    let is_sufficient = first_present(payload, &["is_sufficient", "evaluation_is_sufficient"])
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let quality_score = first_present(payload, &["quality_score", "evaluation_quality_score"])
        .filter(|v| v.is_number());
    let reasoning = first_present(payload, &["reasoning", "evaluation_reasoning"])
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());

    let mut step = new_step(step_id(task_id, StepKind::Evaluation), StepKind::Evaluation, TITLE, payload);

    let message = if is_sufficient {
        MEETS_REQUIREMENTS
    } else {
        NEEDS_IMPROVEMENT
    };
    let mut verdict = StepDetail::new(DetailKind::Analysis, message).with_meta("is_sufficient", is_sufficient);
    if let Some(score) = quality_score {
        verdict = verdict.with_meta("quality_score", score.clone());
    }
    step.details.push(verdict);

    if let Some(reasoning) = reasoning {
        step.details.push(StepDetail::new(DetailKind::Analysis, reasoning));
    }

    Some(step)
}
