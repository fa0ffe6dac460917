//! The visibility filter: computes the ordered set of display items for
//! a given view context.
//!
//! The pipeline runs in five steps over a store snapshot:
//!
//! 1. Flatten events and their sessions into tagged [`DisplayItem`]s
//! 2. Month view suppresses session entries entirely
//! 3. Apply the type filter, except that week/day views always retain
//!    session entries, which are considered always-relevant sub-detail
//!    once a single day is in view
//! 4. Retain only items inside the view window
//! 5. Stable order: siblings by display order then start time

use chrono::Timelike;

use classtime_core::models::event::Event;
use classtime_core::models::view::{CalendarView, DisplayItem, ItemKind, TypeFilter, ViewContext};

use crate::config::EngineConfig;
use crate::store::EventStore;
use crate::time_grid::view_window;

pub fn visible_items(
    store: &EventStore,
    ctx: &ViewContext,
    config: &EngineConfig,
) -> Vec<DisplayItem> {
    let mut items = flatten(store.events());

    // Month cells only ever show top-level events; sessions render as
    // children in week/day views.
    if ctx.view == CalendarView::Month {
        items.retain(|item| !item.is_session());
    }

    // Type filtering is separate from view suppression: once the user
    // has drilled into a week or day, sessions stay visible even when
    // their parent's type is filtered out.
    if ctx.type_filter != TypeFilter::All {
        let sessions_exempt = matches!(ctx.view, CalendarView::Week | CalendarView::Day);
        items.retain(|item| {
            (item.is_session() && sessions_exempt) || ctx.type_filter.matches(item.event_type)
        });
    }

    let (from, to) = view_window(ctx.anchor, ctx.view, config.week_start);
    items.retain(|item| item.date >= from && item.date <= to);

    items.sort_by_key(sort_key);
    items
}

/// One entry per event plus one per active session, each carrying its
/// discriminant. This is the only place the event/session distinction is
/// encoded; everything downstream reads the tag.
fn flatten(events: &[Event]) -> Vec<DisplayItem> {
    let mut items = Vec::new();
    for event in events {
        let anchor_minutes = event
            .start_time
            .filter(|_| !event.is_all_day)
            .map(minute_of_day)
            .unwrap_or(0);

        items.push(DisplayItem {
            kind: ItemKind::Event,
            id: event.id,
            title: event.title.clone(),
            date: event.start_date,
            start_time: if event.is_all_day { None } else { event.start_time },
            end_time: if event.is_all_day { None } else { event.end_time },
            event_type: event.event_type,
            color: event.color(),
            all_day: event.is_all_day,
            display_order: 0,
            anchor_minutes,
        });

        for session in event.sessions.iter().filter(|s| s.is_active) {
            items.push(DisplayItem {
                kind: ItemKind::Session { event_id: event.id },
                id: session.id,
                title: session.title.clone(),
                date: event.start_date,
                start_time: Some(session.start_time),
                end_time: Some(session.end_time),
                // Sessions inherit their parent's type for filtering.
                event_type: event.event_type,
                color: session
                    .color_code
                    .clone()
                    .unwrap_or_else(|| event.color()),
                all_day: false,
                display_order: session.display_order,
                anchor_minutes,
            });
        }
    }
    items
}

/// Total order realizing "display order within the same parent, then
/// start time": items sort by date, then by their parent anchor (a
/// session anchors on its parent's start, so siblings stay grouped),
/// events before their sessions, then display order and start time.
fn sort_key(item: &DisplayItem) -> (chrono::NaiveDate, u32, u8, i32, u32, uuid::Uuid) {
    (
        item.date,
        item.anchor_minutes,
        u8::from(item.is_session()),
        item.display_order,
        item.start_time.map(minute_of_day).unwrap_or(0),
        item.id,
    )
}

fn minute_of_day(time: chrono::NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}
