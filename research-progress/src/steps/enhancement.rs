//! Content enhancement step
//!
//! The enhancement node decides whether to deep-crawl priority URLs and
//! reports one of a fixed set of status strings. Only a literal `skipped`
//! marks the step itself as skipped; `skipped_no_api` is a completed step
//! that explains why nothing was crawled.

use research_progress_sdk::{
    DetailKind, EventCategory, EventRecord, Step, StepDetail, StepKind, StepStatus,
};
use serde_json::Value;

use super::{latest_payload, new_step, step_id};
use crate::utils::{get_array, get_bool, get_str};

pub const TITLE: &str = "Content Enhancement Analysis";
pub const UNKNOWN_STATUS: &str = "unknown";

/// Fixed message for a known enhancement status
pub fn status_message(status: &str) -> Option<&'static str> {
    let message = match status {
        "skipped" => "Content enhancement not needed - current information is sufficient",
        "completed" => "Content enhancement completed - deep content retrieved",
        "failed" => "Content enhancement failed - no content could be retrieved",
        "error" => "Content enhancement encountered an error",
        "analyzing" => "Analyzing whether content enhancement is needed",
        "skipped_no_api" => "Content enhancement skipped - no API key",
        _ => return None,
    };
    Some(message)
}

pub fn synthesize(task_id: &str, events: &[&EventRecord]) -> Option<Step> {
    let payload = latest_payload(events, EventCategory::ContentEnhancement)?;
    let status = get_str(payload, "enhancement_status").unwrap_or(UNKNOWN_STATUS);
    let no_decision = Value::Null;
    let decision = payload.get("enhancement_decision").unwrap_or(&no_decision);

    let mut step = new_step(
        step_id(task_id, StepKind::ContentEnhancement),
        StepKind::ContentEnhancement,
        TITLE,
        payload,
    );
    if status == "skipped" {
        step.status = StepStatus::Skipped;
    }

    let message = status_message(status)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Status: {}", status));
    step.details.push(decision_detail(message, status, payload, decision));

    if let Some(error) = get_str(payload, "enhancement_error") {
        step.details.push(StepDetail::new(
            DetailKind::Analysis,
            format!("Enhancement error: {}", error),
        ));
    }

    let reasoning = get_str(payload, "reasoning").or_else(|| get_str(decision, "reasoning"));
    if let Some(reasoning) = reasoning {
        step.details.push(StepDetail::new(DetailKind::Analysis, reasoning));
    }

    Some(step)
}

fn decision_detail(message: String, status: &str, payload: &Value, decision: &Value) -> StepDetail {
    let mut detail = StepDetail::new(DetailKind::Decision, message).with_meta("status", status);

    if let Some(needed) = get_bool(decision, "needs_enhancement") {
        detail = detail.with_meta("needs_enhancement", needed);
    }
    if let Some(confidence) = decision.get("confidence_score").filter(|v| v.is_number()) {
        detail = detail.with_meta("confidence_score", confidence.clone());
    }
    if let Some(kind) = get_str(decision, "enhancement_type") {
        detail = detail.with_meta("enhancement_type", kind);
    }
    if let Some(urls) = get_array(decision, "priority_urls") {
        detail = detail.with_meta("priority_url_count", urls.len());
    }
    if let Some(count) = payload.get("enhanced_sources_count").filter(|v| v.is_u64()) {
        detail = detail.with_meta("enhanced_sources_count", count.clone());
    }
    if let Some(error) = get_str(payload, "enhancement_error") {
        detail = detail.with_meta("error", error);
    }
    detail
}
