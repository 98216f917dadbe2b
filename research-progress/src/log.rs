//! Loading event logs and message transcripts from disk
//!
//! Two layouts are accepted:
//!
//! - a single JSON array of items
//! - one JSON item per line, optionally as a server-sent-events capture
//!   (`data:` prefixes are stripped; comments and `event:`/`id:`/`retry:`
//!   lines are skipped)

use research_progress_sdk::{EventRecord, Message};
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::LogError;

const SSE_FIELDS: [&str; 3] = ["event:", "id:", "retry:"];

pub fn load_events_from_str(text: &str) -> Result<Vec<EventRecord>, LogError> {
    parse_items(text)
}

pub fn load_messages_from_str(text: &str) -> Result<Vec<Message>, LogError> {
    parse_items(text)
}

pub fn load_events(path: &Path) -> Result<Vec<EventRecord>, LogError> {
    load_events_from_str(&read(path)?)
}

pub fn load_messages(path: &Path) -> Result<Vec<Message>, LogError> {
    load_messages_from_str(&read(path)?)
}

/// Read a log file without blocking the runtime; parsing is left to the caller
pub async fn read_log(path: &Path) -> Result<String, LogError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| LogError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn read(path: &Path) -> Result<String, LogError> {
    std::fs::read_to_string(path).map_err(|source| LogError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_items<T: DeserializeOwned>(text: &str) -> Result<Vec<T>, LogError> {
    if text.trim_start().starts_with('[') {
        return Ok(serde_json::from_str(text)?);
    }

    let mut items = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let Some(payload) = line_payload(raw) else {
            continue;
        };
        let item = serde_json::from_str(payload).map_err(|source| LogError::InvalidLine {
            line: index + 1,
            source,
        })?;
        items.push(item);
    }
    Ok(items)
}

/// JSON text carried by a line, or `None` if the line holds no item
fn line_payload(raw: &str) -> Option<&str> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with(':') {
        return None;
    }
    if SSE_FIELDS.iter().any(|field| line.starts_with(field)) {
        return None;
    }
    let payload = line.strip_prefix("data:").map(str::trim).unwrap_or(line);
    (!payload.is_empty()).then_some(payload)
}
