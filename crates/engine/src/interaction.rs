//! Routes cell and item clicks to UI intents.
//!
//! Routing is a pure function of the view context, the actor, and the
//! click target. Session-vs-event decisions read the display item's
//! kind tag; nothing here inspects titles or other display text.

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use classtime_core::models::view::{Actor, CalendarView, DisplayItem, ItemKind, ViewContext};

/// What the user clicked.
#[derive(Debug, Clone, Copy)]
pub enum ClickTarget<'a> {
    /// A date cell in the month grid.
    DayCell { date: NaiveDate },
    /// An hour cell in the week/day grid, with the session already
    /// occupying it, if any.
    HourCell {
        date: NaiveDate,
        hour: u32,
        occupant: Option<&'a DisplayItem>,
    },
    /// A rendered event or session item.
    Item(&'a DisplayItem),
}

/// Opaque UI intents handed back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    CreateEvent {
        date: NaiveDate,
        all_day: bool,
    },
    CreateSession {
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    },
    EditSession {
        session_id: Uuid,
        event_id: Uuid,
    },
    ViewEventDetails {
        event_id: Uuid,
    },
    ViewSessionDetails {
        session_id: Uuid,
        event_id: Uuid,
    },
    Noop,
}

pub fn route_click(ctx: &ViewContext, actor: Actor, target: ClickTarget<'_>) -> Intent {
    match target {
        // Details stay available to everyone; only mutations are gated.
        ClickTarget::Item(item) => match item.kind {
            ItemKind::Event => Intent::ViewEventDetails { event_id: item.id },
            ItemKind::Session { event_id } => Intent::ViewSessionDetails {
                session_id: item.id,
                event_id,
            },
        },

        ClickTarget::DayCell { date } => {
            if ctx.view != CalendarView::Month || !actor.privileged {
                return Intent::Noop;
            }
            Intent::CreateEvent {
                date,
                all_day: true,
            }
        }

        ClickTarget::HourCell {
            date,
            hour,
            occupant,
        } => {
            if !matches!(ctx.view, CalendarView::Week | CalendarView::Day) || !actor.privileged {
                return Intent::Noop;
            }
            if let Some(item) = occupant {
                if let ItemKind::Session { event_id } = item.kind {
                    return Intent::EditSession {
                        session_id: item.id,
                        event_id,
                    };
                }
            }
            // An occupying event does not block scheduling: container
            // resolution will attach the new session to it.
            let (start, end) = slot_times(hour);
            Intent::CreateSession { date, start, end }
        }
    }
}

/// The default `[hour:00, hour+1:00)` range for an empty-slot click,
/// saturating at end of day.
fn slot_times(hour: u32) -> (NaiveTime, NaiveTime) {
    let start = NaiveTime::from_hms_opt(hour.min(23), 0, 0).expect("hour is in range");
    let end = NaiveTime::from_hms_opt(hour + 1, 0, 0)
        .unwrap_or_else(|| NaiveTime::from_hms_opt(23, 59, 59).expect("valid time"));
    (start, end)
}
