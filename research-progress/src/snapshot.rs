//! Latest-state reconstruction from the event stream
//!
//! The pipeline publishes partial state updates. Folding them in order yields
//! the state the pipeline is currently in: every object-valued payload is
//! merged one level deep, so a later top-level key replaces an earlier one while
//! distinct keys accumulate. Nested objects are replaced whole, never merged.

use research_progress_sdk::EventRecord;
use serde_json::{Map, Value};

use crate::utils::as_index;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSnapshot {
    fields: Map<String, Value>,
}

impl StateSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold an ordered event sequence into one snapshot
    pub fn accumulate(events: &[EventRecord]) -> Self {
        let mut snapshot = Self::new();
        for record in events {
            snapshot.merge_record(record);
        }
        snapshot
    }

    /// Merge every payload of one record, in record key order
    pub fn merge_record(&mut self, record: &EventRecord) {
        for event in record {
            self.merge_payload(event.payload());
        }
    }

    /// Shallow-merge one payload. Later keys win. Non-object payloads are
    /// ignored and reported as `false`.
    pub fn merge_payload(&mut self, payload: &Value) -> bool {
        let Some(object) = payload.as_object() else {
            return false;
        };
        for (key, value) in object {
            self.fields.insert(key.clone(), value.clone());
        }
        true
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Whether the pipeline has published a plan (null counts as absent)
    pub fn has_plan(&self) -> bool {
        self.get("plan").is_some_and(|plan| !plan.is_null())
    }

    /// Plan entries; empty when absent or not a list
    pub fn plan(&self) -> &[Value] {
        self.get("plan")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Zero-based pointer into the plan, defaulting to 0
    pub fn current_task_pointer(&self) -> usize {
        self.get("current_task_pointer")
            .and_then(as_index)
            .unwrap_or(0)
    }
}
