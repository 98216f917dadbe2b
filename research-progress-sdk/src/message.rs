//! Conversation messages that travel alongside the event stream

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Author of a message, read from the `type` discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    Human,
    #[serde(alias = "assistant")]
    Ai,
    System,
    Tool,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "type", default)]
    pub role: MessageRole,

    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,

    /// Opaque content; not decoded by the view layer
    #[serde(default)]
    pub content: Value,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<Value>) -> Self {
        Self {
            role,
            id: None,
            content: content.into(),
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.role == MessageRole::Ai
    }
}

/// String and numeric ids are kept as text; any other shape reads as no id
fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Most recent assistant-authored message, searching from the end
pub fn latest_assistant_message(messages: &[Message]) -> Option<&Message> {
    messages.iter().rev().find(|m| m.is_assistant())
}
