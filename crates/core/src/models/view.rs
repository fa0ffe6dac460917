use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::event::EventType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalendarView {
    Month,
    Week,
    Day,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFilter {
    All,
    Only(EventType),
}

impl TypeFilter {
    pub fn matches(&self, event_type: EventType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => *wanted == event_type,
        }
    }
}

/// The view state the UI is currently rendering. Passed explicitly into
/// the visibility filter and the interaction router; there is no ambient
/// view or date state anywhere in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewContext {
    pub view: CalendarView,
    pub anchor: NaiveDate,
    pub type_filter: TypeFilter,
}

impl ViewContext {
    pub fn new(view: CalendarView, anchor: NaiveDate) -> Self {
        Self {
            view,
            anchor,
            type_filter: TypeFilter::All,
        }
    }

    pub fn with_filter(mut self, filter: TypeFilter) -> Self {
        self.type_filter = filter;
        self
    }
}

/// Whether the caller may mutate the calendar. Resolved by the embedding
/// application and handed in as a plain value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub privileged: bool,
}

impl Actor {
    pub fn privileged() -> Self {
        Self { privileged: true }
    }

    pub fn viewer() -> Self {
        Self { privileged: false }
    }
}

/// Discriminant carried by every flattened display item. Set once during
/// store flattening and never re-derived from display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    Event,
    Session { event_id: Uuid },
}

/// A render-ready entry produced by the visibility filter: one per event
/// plus one per session (sessions tagged with their parent).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayItem {
    pub kind: ItemKind,
    pub id: Uuid,
    pub title: String,
    pub date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub event_type: EventType,
    pub color: String,
    pub all_day: bool,
    pub display_order: i32,
    /// Minute-of-day anchor used for ordering: a session anchors on its
    /// parent event's start so siblings group together under it.
    pub anchor_minutes: u32,
}

impl DisplayItem {
    pub fn is_session(&self) -> bool {
        matches!(self.kind, ItemKind::Session { .. })
    }

    pub fn parent_event_id(&self) -> Option<Uuid> {
        match self.kind {
            ItemKind::Event => None,
            ItemKind::Session { event_id } => Some(event_id),
        }
    }

    /// The timestamp the item is keyed on: its date plus its start time,
    /// or midnight when it carries no time information.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.start_time.unwrap_or(NaiveTime::MIN))
    }
}
