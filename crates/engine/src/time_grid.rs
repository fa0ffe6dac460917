//! Pure time-grid math: hour-bucket membership, multi-hour segment
//! classification, and view-window computation. Everything here is
//! side-effect free and operates on already-flattened display items.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, Timelike, Weekday};

use classtime_core::models::view::{CalendarView, DisplayItem};

use crate::config::EngineConfig;

/// How a multi-hour item is drawn in one hour row, so consecutive rows
/// render as a continuous visual block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentPosition {
    Start,
    Middle,
    End,
    Single,
}

impl SegmentPosition {
    /// Titles are drawn once per block, not once per hour row.
    pub fn show_title(&self) -> bool {
        matches!(self, SegmentPosition::Start | SegmentPosition::Single)
    }
}

/// The half-open hour span `[start, end)` an item occupies on the grid.
///
/// All-day items span every visible hour. Timed items span their clock
/// hours, with a one-hour floor so a sub-hour item never vanishes from
/// the grid. Untimed items fall back to the single hour of their
/// timestamp.
fn hour_span(item: &DisplayItem, config: &EngineConfig) -> (u32, u32) {
    if item.all_day {
        return (config.first_hour, config.last_hour + 1);
    }
    match (item.start_time, item.end_time) {
        (Some(start), Some(end)) => {
            let start_hour = start.hour();
            (start_hour, end.hour().max(start_hour + 1))
        }
        _ => {
            let hour = item.timestamp().hour();
            (hour, hour + 1)
        }
    }
}

/// The set of hour rows `item` occupies on `date`. Empty when the item
/// does not fall on `date` at all.
pub fn hour_buckets(item: &DisplayItem, date: NaiveDate, config: &EngineConfig) -> BTreeSet<u32> {
    if item.date != date {
        return BTreeSet::new();
    }
    let (start, end) = hour_span(item, config);
    (start..end).collect()
}

/// True iff `item` falls on `date` and occupies the given hour row.
pub fn occupies_hour(item: &DisplayItem, hour: u32, date: NaiveDate, config: &EngineConfig) -> bool {
    hour_buckets(item, date, config).contains(&hour)
}

/// Classifies `item`'s rendering within one hour row, or `None` when the
/// item does not occupy that row.
pub fn segment_position(
    item: &DisplayItem,
    hour: u32,
    config: &EngineConfig,
) -> Option<SegmentPosition> {
    let (start, end) = hour_span(item, config);
    if hour < start || hour >= end {
        return None;
    }
    if end - start == 1 {
        Some(SegmentPosition::Single)
    } else if hour == start {
        Some(SegmentPosition::Start)
    } else if hour == end - 1 {
        Some(SegmentPosition::End)
    } else {
        Some(SegmentPosition::Middle)
    }
}

/// Inclusive `[from, to]` date range a view renders around an anchor.
///
/// Month windows are aligned to the calendar grid: the week containing
/// the 1st through the week containing the last day of the month.
pub fn view_window(
    anchor: NaiveDate,
    view: CalendarView,
    week_start: Weekday,
) -> (NaiveDate, NaiveDate) {
    match view {
        CalendarView::Day => (anchor, anchor),
        CalendarView::Week => week_bounds(anchor, week_start),
        CalendarView::Month => {
            let first = anchor.with_day(1).expect("day 1 exists in every month");
            let last = last_day_of_month(anchor);
            (week_bounds(first, week_start).0, week_bounds(last, week_start).1)
        }
    }
}

fn week_bounds(date: NaiveDate, week_start: Weekday) -> (NaiveDate, NaiveDate) {
    let offset = (7 + date.weekday().num_days_from_sunday()
        - week_start.num_days_from_sunday())
        % 7;
    let start = date - Duration::days(i64::from(offset));
    (start, start + Duration::days(6))
}

fn last_day_of_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = (date.year(), date.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .expect("first of month is always valid");
    first_of_next - Duration::days(1)
}
