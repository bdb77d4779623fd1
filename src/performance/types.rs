use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::scoring::{Event, EventType, ResultKind};

/// One event's entry within a performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResult {
    #[serde(rename = "name")]
    pub event: Event,
    /// Raw text as the athlete typed it, possibly empty
    pub result: String,
    pub points: u32,
    #[serde(rename = "type")]
    pub kind: ResultKind,
    /// Display unit of `result` ("seconds", "meters", "feet")
    pub unit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u8>,
}

/// A saved multi-event performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Performance {
    pub id: u64,
    pub event_type: EventType,
    pub event_results: Vec<EventResult>,
    pub total_score: u32,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Performance {
    pub fn age(&self) -> chrono::Duration {
        Utc::now() - self.date
    }
}

/// Everything needed to create or replace a performance; the store
/// assigns the id and date and derives the total.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPerformance {
    pub event_type: EventType,
    pub event_results: Vec<EventResult>,
    pub label: Option<String>,
}

impl NewPerformance {
    pub fn total_score(&self) -> u32 {
        self.event_results.iter().fold(0u32, |sum, r| sum.saturating_add(r.points))
    }
}
