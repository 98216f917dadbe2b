//! Search query generation step

use research_progress_sdk::{DetailKind, EventCategory, EventRecord, Step, StepDetail, StepKind};

use super::{latest_payload, new_step, step_id};
use crate::utils::get_query_list;

pub const TITLE: &str = "Generating Search Queries";
pub const NO_QUERIES: &str = "No queries";

pub fn synthesize(task_id: &str, events: &[&EventRecord]) -> Option<Step> {
    let payload = latest_payload(events, EventCategory::GenerateQuery)?;

    let mut queries = get_query_list(payload, "query_list");
    if queries.is_empty() {
        queries = get_query_list(payload, "search_query");
    }

    let content = if queries.is_empty() {
        NO_QUERIES.to_string()
    } else {
        queries.join(", ")
    };

    let mut step = new_step(step_id(task_id, StepKind::QueryGeneration), StepKind::QueryGeneration, TITLE, payload);
    step.details.push(
        StepDetail::new(DetailKind::SearchQueries, content)
            .with_meta("count", queries.len())
            .with_meta("queries", queries),
    );
    Some(step)
}
