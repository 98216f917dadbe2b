//! Web research steps, one per search the pipeline executed

use research_progress_sdk::{DetailKind, EventCategory, EventRecord, Step, StepDetail, StepKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{all_payloads, new_step, step_id};
use crate::utils::{get_array, get_query_list, get_str, query_text};

pub const UNKNOWN_QUERY: &str = "Unknown Query";
pub const DEFAULT_SOURCE_TITLE: &str = "Source";
pub const DEFAULT_SOURCE_LABEL: &str = "Web";
pub const NO_PREVIEW: &str = "No preview available";

/// A gathered source in the shape the renderer expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedSource {
    pub title: String,
    pub url: String,
    pub label: String,
    pub snippet: String,
}

impl NormalizedSource {
    /// Normalize a raw source object.
    ///
    /// Fallbacks: title → label → "Source"; value → short_url → url → "";
    /// label → "Web"; snippet → "No preview available".
    pub fn from_value(source: &Value) -> Self {
        let label = get_str(source, "label");
        Self {
            title: get_str(source, "title")
                .or(label)
                .unwrap_or(DEFAULT_SOURCE_TITLE)
                .to_string(),
            url: get_str(source, "value")
                .or_else(|| get_str(source, "short_url"))
                .or_else(|| get_str(source, "url"))
                .unwrap_or_default()
                .to_string(),
            label: label.unwrap_or(DEFAULT_SOURCE_LABEL).to_string(),
            snippet: get_str(source, "snippet").unwrap_or(NO_PREVIEW).to_string(),
        }
    }
}

/// Query a web research payload ran: first executed query, then `search_query`
pub fn resolve_query(payload: &Value) -> String {
    get_array(payload, "executed_queries")
        .and_then(|queries| queries.first())
        .and_then(query_text)
        .or_else(|| get_query_list(payload, "search_query").into_iter().next())
        .unwrap_or_else(|| UNKNOWN_QUERY.to_string())
}

pub fn synthesize(task_id: &str, events: &[&EventRecord]) -> Vec<Step> {
    all_payloads(events, EventCategory::WebResearch)
        .into_iter()
        .enumerate()
        .map(|(index, payload)| research_step(task_id, index, payload))
        .collect()
}

fn research_step(task_id: &str, index: usize, payload: &Value) -> Step {
    let query = resolve_query(payload);
    let sources: Vec<NormalizedSource> = get_array(payload, "sources_gathered")
        .unwrap_or_default()
        .iter()
        .map(NormalizedSource::from_value)
        .collect();
    let sources_value = serde_json::to_value(&sources).unwrap_or_default();

    let id = format!("{}-{}", step_id(task_id, StepKind::WebResearch), index);
    let mut step = new_step(id, StepKind::WebResearch, query.clone(), payload);
    step.details.push(
        StepDetail::new(DetailKind::SearchQueries, query.clone()).with_meta("query", query),
    );
    step.details.push(
        StepDetail::new(DetailKind::Sources, format!("Found {} sources", sources.len()))
            .with_meta("count", sources.len())
            .with_meta("sources", sources_value),
    );
    step
}
