use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::normalize_optional;
use crate::models::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Class,
    Exam,
    Holiday,
    SpecialEvent,
    CancelledClass,
    /// Catch-all for values the remote side knows about but we don't.
    #[serde(other)]
    Other,
}

impl EventType {
    /// Default display color when an event carries no explicit color code.
    pub fn default_color(&self) -> &'static str {
        match self {
            EventType::Class => "#16a34a",
            EventType::Exam => "#ea580c",
            EventType::Holiday => "#dc2626",
            EventType::SpecialEvent => "#9333ea",
            EventType::CancelledClass => "#6b7280",
            EventType::Other => "#2563eb",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EventType::Class => "class",
            EventType::Exam => "exam",
            EventType::Holiday => "holiday",
            EventType::SpecialEvent => "special_event",
            EventType::CancelledClass => "cancelled_class",
            EventType::Other => "other",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_all_day: bool,
    pub event_type: EventType,
    pub color_code: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub sessions: Vec<Session>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Resolved display color: the explicit code, or the type default.
    pub fn color(&self) -> String {
        self.color_code
            .clone()
            .unwrap_or_else(|| self.event_type.default_color().to_string())
    }

    /// The event's wall-clock range, when it is timed (not all-day and
    /// both endpoints present).
    pub fn timed_range(&self) -> Option<(NaiveTime, NaiveTime)> {
        if self.is_all_day {
            return None;
        }
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub is_all_day: bool,
    pub event_type: EventType,
    pub color_code: Option<String>,
    pub location: Option<String>,
}

impl EventDraft {
    /// Normalizes user input: trims strings, maps blanks to `None`, and
    /// defaults a missing end date to the start date.
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = normalize_optional(self.description);
        self.color_code = normalize_optional(self.color_code);
        self.location = normalize_optional(self.location);
        self.end_date = Some(self.end_date.unwrap_or(self.start_date));
        self
    }
}

/// Full-replacement update payload. Updates do not merge partial nested
/// structures: every field here overwrites the stored value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPatch {
    pub title: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub is_all_day: bool,
    pub event_type: EventType,
    pub color_code: Option<String>,
    pub location: Option<String>,
}

impl EventPatch {
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = normalize_optional(self.description);
        self.color_code = normalize_optional(self.color_code);
        self.location = normalize_optional(self.location);
        self.end_date = Some(self.end_date.unwrap_or(self.start_date));
        self
    }
}
