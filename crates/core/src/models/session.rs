use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::normalize_optional;

/// A sub-interval of work nested inside an event's day. Sessions never
/// exist without a parent event; their times are interpreted on the
/// parent's `start_date`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub event_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub presenter: Option<String>,
    pub location: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub session_type: String,
    pub color_code: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub attendance_required: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionDraft {
    pub title: String,
    pub description: Option<String>,
    pub presenter: Option<String>,
    pub location: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub session_type: String,
    pub color_code: Option<String>,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub attendance_required: bool,
}

fn default_true() -> bool {
    true
}

impl SessionDraft {
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = normalize_optional(self.description);
        self.presenter = normalize_optional(self.presenter);
        self.location = normalize_optional(self.location);
        self.color_code = normalize_optional(self.color_code);
        self.session_type = self.session_type.trim().to_string();
        self
    }

    /// Same draft with its time range replaced, used when a session is
    /// scheduled into a clicked grid slot.
    pub fn with_times(mut self, start: NaiveTime, end: NaiveTime) -> Self {
        self.start_time = start;
        self.end_time = end;
        self
    }
}

/// Full-replacement update payload for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPatch {
    pub title: String,
    pub description: Option<String>,
    pub presenter: Option<String>,
    pub location: Option<String>,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub session_type: String,
    pub color_code: Option<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub attendance_required: bool,
}

impl SessionPatch {
    pub fn normalized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = normalize_optional(self.description);
        self.presenter = normalize_optional(self.presenter);
        self.location = normalize_optional(self.location);
        self.color_code = normalize_optional(self.color_code);
        self.session_type = self.session_type.trim().to_string();
        self
    }
}
