//! Event records emitted by the research pipeline
//!
//! The pipeline streams one record per graph update. A record maps a category
//! name (the node that produced the update) to an opaque JSON payload, and a
//! single record may carry several categories at once. Every entry is classified
//! into a [`ResearchEvent`] on the way in so consumers match on variants instead
//! of probing string keys.

use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;

/// Categories the view layer knows how to interpret
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventCategory {
    Planner,
    PlannerNode,
    Planning,
    GenerateQuery,
    WebResearch,
    Reflection,
    ContentEnhancement,
    EvaluateResearchEnhanced,
    RecordTaskCompletion,
    FinalizeAnswer,
}

impl EventCategory {
    pub const ALL: [EventCategory; 10] = [
        EventCategory::Planner,
        EventCategory::PlannerNode,
        EventCategory::Planning,
        EventCategory::GenerateQuery,
        EventCategory::WebResearch,
        EventCategory::Reflection,
        EventCategory::ContentEnhancement,
        EventCategory::EvaluateResearchEnhanced,
        EventCategory::RecordTaskCompletion,
        EventCategory::FinalizeAnswer,
    ];

    /// Resolve a record key to a known category
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|category| category.as_str() == key)
    }

    /// The record key this category is published under
    pub fn as_str(self) -> &'static str {
        match self {
            EventCategory::Planner => "planner",
            EventCategory::PlannerNode => "planner_node",
            EventCategory::Planning => "planning",
            EventCategory::GenerateQuery => "generate_query",
            EventCategory::WebResearch => "web_research",
            EventCategory::Reflection => "reflection",
            EventCategory::ContentEnhancement => "content_enhancement",
            EventCategory::EvaluateResearchEnhanced => "evaluate_research_enhanced",
            EventCategory::RecordTaskCompletion => "record_task_completion",
            EventCategory::FinalizeAnswer => "finalize_answer",
        }
    }

    /// Whether this category signals that a research plan exists
    pub fn is_planning(self) -> bool {
        matches!(
            self,
            EventCategory::Planner | EventCategory::PlannerNode | EventCategory::Planning
        )
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single keyed entry of an [`EventRecord`]
#[derive(Debug, Clone, PartialEq)]
pub enum ResearchEvent {
    Planner(Value),
    PlannerNode(Value),
    Planning(Value),
    GenerateQuery(Value),
    WebResearch(Value),
    Reflection(Value),
    ContentEnhancement(Value),
    EvaluateResearchEnhanced(Value),
    RecordTaskCompletion(Value),
    FinalizeAnswer(Value),
    /// Any key the view layer does not interpret. Carried through untouched.
    Unrecognized { category: String, payload: Value },
}

impl ResearchEvent {
    /// Classify a raw record entry
    pub fn classify(key: impl Into<String>, payload: Value) -> Self {
        let key = key.into();
        match EventCategory::from_key(&key) {
            Some(category) => Self::recognized(category, payload),
            None => ResearchEvent::Unrecognized {
                category: key,
                payload,
            },
        }
    }

    pub fn recognized(category: EventCategory, payload: Value) -> Self {
        match category {
            EventCategory::Planner => ResearchEvent::Planner(payload),
            EventCategory::PlannerNode => ResearchEvent::PlannerNode(payload),
            EventCategory::Planning => ResearchEvent::Planning(payload),
            EventCategory::GenerateQuery => ResearchEvent::GenerateQuery(payload),
            EventCategory::WebResearch => ResearchEvent::WebResearch(payload),
            EventCategory::Reflection => ResearchEvent::Reflection(payload),
            EventCategory::ContentEnhancement => ResearchEvent::ContentEnhancement(payload),
            EventCategory::EvaluateResearchEnhanced => {
                ResearchEvent::EvaluateResearchEnhanced(payload)
            }
            EventCategory::RecordTaskCompletion => ResearchEvent::RecordTaskCompletion(payload),
            EventCategory::FinalizeAnswer => ResearchEvent::FinalizeAnswer(payload),
        }
    }

    /// Known category, or `None` for unrecognized entries
    pub fn category(&self) -> Option<EventCategory> {
        match self {
            ResearchEvent::Planner(_) => Some(EventCategory::Planner),
            ResearchEvent::PlannerNode(_) => Some(EventCategory::PlannerNode),
            ResearchEvent::Planning(_) => Some(EventCategory::Planning),
            ResearchEvent::GenerateQuery(_) => Some(EventCategory::GenerateQuery),
            ResearchEvent::WebResearch(_) => Some(EventCategory::WebResearch),
            ResearchEvent::Reflection(_) => Some(EventCategory::Reflection),
            ResearchEvent::ContentEnhancement(_) => Some(EventCategory::ContentEnhancement),
            ResearchEvent::EvaluateResearchEnhanced(_) => {
                Some(EventCategory::EvaluateResearchEnhanced)
            }
            ResearchEvent::RecordTaskCompletion(_) => Some(EventCategory::RecordTaskCompletion),
            ResearchEvent::FinalizeAnswer(_) => Some(EventCategory::FinalizeAnswer),
            ResearchEvent::Unrecognized { .. } => None,
        }
    }

    /// The record key this entry was published under
    pub fn key(&self) -> &str {
        match self {
            ResearchEvent::Unrecognized { category, .. } => category,
            other => other.category().map_or("", EventCategory::as_str),
        }
    }

    pub fn payload(&self) -> &Value {
        match self {
            ResearchEvent::Planner(payload)
            | ResearchEvent::PlannerNode(payload)
            | ResearchEvent::Planning(payload)
            | ResearchEvent::GenerateQuery(payload)
            | ResearchEvent::WebResearch(payload)
            | ResearchEvent::Reflection(payload)
            | ResearchEvent::ContentEnhancement(payload)
            | ResearchEvent::EvaluateResearchEnhanced(payload)
            | ResearchEvent::RecordTaskCompletion(payload)
            | ResearchEvent::FinalizeAnswer(payload)
            | ResearchEvent::Unrecognized { payload, .. } => payload,
        }
    }

    fn into_entry(self) -> (String, Value) {
        let key = self.key().to_string();
        let payload = match self {
            ResearchEvent::Planner(payload)
            | ResearchEvent::PlannerNode(payload)
            | ResearchEvent::Planning(payload)
            | ResearchEvent::GenerateQuery(payload)
            | ResearchEvent::WebResearch(payload)
            | ResearchEvent::Reflection(payload)
            | ResearchEvent::ContentEnhancement(payload)
            | ResearchEvent::EvaluateResearchEnhanced(payload)
            | ResearchEvent::RecordTaskCompletion(payload)
            | ResearchEvent::FinalizeAnswer(payload)
            | ResearchEvent::Unrecognized { payload, .. } => payload,
        };
        (key, payload)
    }
}

/// One record of the pipeline's event stream
///
/// Entries keep the order in which the producer wrote them. Keys are unique
/// within a record; inserting an existing key replaces its payload in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRecord {
    entries: Vec<ResearchEvent>,
}

impl EventRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from a decoded JSON object
    pub fn from_map(map: Map<String, Value>) -> Self {
        let mut record = Self::new();
        for (key, payload) in map {
            record.insert(key, payload);
        }
        record
    }

    /// Build a record from any JSON value. Returns `None` for non-objects.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self::from_map(map)),
            _ => None,
        }
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, payload: Value) -> Self {
        self.insert(key, payload);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, payload: Value) {
        let event = ResearchEvent::classify(key, payload);
        match self.entries.iter_mut().find(|e| e.key() == event.key()) {
            Some(existing) => *existing = event,
            None => self.entries.push(event),
        }
    }

    pub fn entries(&self) -> &[ResearchEvent] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ResearchEvent> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Payload published under a known category
    pub fn get(&self, category: EventCategory) -> Option<&Value> {
        self.entries
            .iter()
            .find(|e| e.category() == Some(category))
            .map(ResearchEvent::payload)
    }

    pub fn contains(&self, category: EventCategory) -> bool {
        self.get(category).is_some()
    }

    pub fn contains_any(&self, categories: &[EventCategory]) -> bool {
        categories.iter().any(|c| self.contains(*c))
    }
}

impl<'a> IntoIterator for &'a EventRecord {
    type Item = &'a ResearchEvent;
    type IntoIter = std::slice::Iter<'a, ResearchEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl From<Map<String, Value>> for EventRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self::from_map(map)
    }
}

impl From<EventRecord> for Value {
    fn from(record: EventRecord) -> Self {
        Value::Object(record.entries.into_iter().map(ResearchEvent::into_entry).collect())
    }
}

impl Serialize for EventRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for event in &self.entries {
            map.serialize_entry(event.key(), event.payload())?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EventRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Self::from_map)
    }
}
