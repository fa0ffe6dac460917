//! Container resolution: finding (or describing) the event that should
//! host a session scheduled into an empty time slot.
//!
//! The search itself is pure so it can be tested without a provider; the
//! create-then-attach flow around it lives in the coordinator.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use classtime_core::models::event::{Event, EventDraft, EventType};
use classtime_core::models::session::SessionDraft;

/// Scans candidate events (all on the requested date, in enumeration
/// order) for a host, trying each clause over the whole list before
/// falling to the next:
///
/// 1. an untimed or all-day event is a universal container
/// 2. an event whose time range fully contains the requested range
/// 3. an event whose start is within `tolerance_min` minutes of the
///    requested start, tolerating minor scheduling drift
///
/// Within a clause, the first event in enumeration order wins; there is
/// no best-fit ranking.
pub fn find_host<'a>(
    candidates: &[&'a Event],
    requested_start: NaiveTime,
    requested_end: NaiveTime,
    tolerance_min: i64,
) -> Option<&'a Event> {
    if let Some(event) = candidates.iter().find(|e| e.timed_range().is_none()) {
        return Some(event);
    }

    if let Some(event) = candidates.iter().find(|e| {
        e.timed_range()
            .is_some_and(|(start, end)| start <= requested_start && requested_end <= end)
    }) {
        return Some(event);
    }

    candidates
        .iter()
        .find(|e| {
            e.timed_range().is_some_and(|(start, _)| {
                (start - requested_start).num_minutes().abs() <= tolerance_min
            })
        })
        .copied()
}

/// The minimal container event synthesized when no existing event can
/// host the requested session.
pub fn container_draft(
    session: &SessionDraft,
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
) -> EventDraft {
    EventDraft {
        title: format!("{} (Event Container)", session.title),
        description: None,
        start_date: date,
        end_date: Some(date),
        start_time: Some(start),
        end_time: Some(end),
        is_all_day: false,
        event_type: EventType::Class,
        color_code: session.color_code.clone(),
        location: None,
    }
}

/// Content-derived idempotency key for auto-container requests: two
/// identical requests for the same empty slot resolve to the same
/// container instead of racing to create duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerKey {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub title: String,
}

impl ContainerKey {
    pub fn new(date: NaiveDate, start: NaiveTime, end: NaiveTime, title: &str) -> Self {
        Self {
            date,
            start,
            end,
            title: title.to_string(),
        }
    }
}

/// How a host was resolved; carried back so the coordinator can tell an
/// attach failure on a pre-existing event apart from one that orphans a
/// freshly created container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedHost {
    Existing(Uuid),
    Created(Uuid),
}

impl ResolvedHost {
    pub fn id(&self) -> Uuid {
        match *self {
            ResolvedHost::Existing(id) | ResolvedHost::Created(id) => id,
        }
    }
}
