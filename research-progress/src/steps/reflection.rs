//! Reflection step: is the gathered information sufficient?

use research_progress_sdk::{DetailKind, EventCategory, EventRecord, Step, StepDetail, StepKind};

use super::{latest_payload, new_step, step_id};
use crate::utils::{get_bool, get_query_list, get_str};

pub const TITLE: &str = "Analyzing Research Results";
pub const SUFFICIENT: &str = "Information is sufficient to answer the research question";
pub const INSUFFICIENT: &str = "Additional information needed to answer the research question";

pub fn synthesize(task_id: &str, events: &[&EventRecord]) -> Option<Step> {
    let payload = latest_payload(events, EventCategory::Reflection)?;
    let is_sufficient = get_bool(payload, "is_sufficient").unwrap_or(false);

    let mut step = new_step(step_id(task_id, StepKind::Reflection), StepKind::Reflection, TITLE, payload);

    let (message, status) = if is_sufficient {
        (SUFFICIENT, "sufficient")
    } else {
        (INSUFFICIENT, "insufficient")
    };
    step.details.push(
        StepDetail::new(DetailKind::Analysis, message)
            .with_meta("status", status)
            .with_meta("is_sufficient", is_sufficient),
    );

    if let Some(gap) = get_str(payload, "knowledge_gap") {
        step.details.push(
            StepDetail::new(DetailKind::Analysis, format!("Knowledge gap: {}", gap))
                .with_meta("knowledge_gap", gap),
        );
    }

    let follow_ups = get_query_list(payload, "follow_up_queries");
    if !follow_ups.is_empty() {
        step.details.push(
            StepDetail::new(
                DetailKind::Decision,
                format!("Generated {} follow-up queries", follow_ups.len()),
            )
            .with_meta("count", follow_ups.len())
            .with_meta("follow_up_queries", follow_ups)
            .with_meta("action_needed", !is_sufficient),
        );
    }

    Some(step)
}
