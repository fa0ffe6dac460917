use chrono::{NaiveDate, NaiveTime, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{from_str, to_string};
use uuid::Uuid;

use classtime_core::models::event::{Event, EventDraft, EventType};
use classtime_core::models::session::{Session, SessionDraft};
use classtime_core::models::view::{DisplayItem, ItemKind, TypeFilter};

fn sample_event() -> Event {
    Event {
        id: Uuid::new_v4(),
        title: "Linear Algebra".to_string(),
        description: Some("Week 4".to_string()),
        start_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        start_time: NaiveTime::from_hms_opt(9, 0, 0),
        end_time: NaiveTime::from_hms_opt(11, 0, 0),
        is_all_day: false,
        event_type: EventType::Class,
        color_code: None,
        location: Some("Room 204".to_string()),
        sessions: Vec::new(),
        created_at: Utc::now(),
    }
}

#[test]
fn test_event_serialization() {
    let event = sample_event();

    let json = to_string(&event).expect("Failed to serialize event");
    let deserialized: Event = from_str(&json).expect("Failed to deserialize event");

    assert_eq!(deserialized.id, event.id);
    assert_eq!(deserialized.title, event.title);
    assert_eq!(deserialized.start_date, event.start_date);
    assert_eq!(deserialized.start_time, event.start_time);
    assert_eq!(deserialized.event_type, event.event_type);
}

#[test]
fn test_session_serialization() {
    let session = Session {
        id: Uuid::new_v4(),
        event_id: Uuid::new_v4(),
        title: "Tutorial".to_string(),
        description: None,
        presenter: Some("Dr. Chen".to_string()),
        location: None,
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        session_type: "lecture".to_string(),
        color_code: None,
        display_order: 2,
        is_active: true,
        attendance_required: false,
        created_at: Utc::now(),
    };

    let json = to_string(&session).expect("Failed to serialize session");
    let deserialized: Session = from_str(&json).expect("Failed to deserialize session");

    assert_eq!(deserialized.id, session.id);
    assert_eq!(deserialized.event_id, session.event_id);
    assert_eq!(deserialized.start_time, session.start_time);
    assert_eq!(deserialized.display_order, session.display_order);
}

#[rstest]
#[case(EventType::Class, "#16a34a")]
#[case(EventType::Exam, "#ea580c")]
#[case(EventType::Holiday, "#dc2626")]
#[case(EventType::SpecialEvent, "#9333ea")]
#[case(EventType::CancelledClass, "#6b7280")]
#[case(EventType::Other, "#2563eb")]
fn test_event_type_default_colors(#[case] event_type: EventType, #[case] expected: &str) {
    assert_eq!(event_type.default_color(), expected);
}

#[test]
fn test_unknown_event_type_deserializes_to_other() {
    let parsed: EventType = serde_json::from_str("\"field_trip\"").unwrap();
    assert_eq!(parsed, EventType::Other);
}

#[test]
fn test_event_color_resolution() {
    let mut event = sample_event();
    assert_eq!(event.color(), "#16a34a");

    event.color_code = Some("#123456".to_string());
    assert_eq!(event.color(), "#123456");
}

#[test]
fn test_timed_range_ignored_for_all_day() {
    let mut event = sample_event();
    assert!(event.timed_range().is_some());

    event.is_all_day = true;
    assert_eq!(event.timed_range(), None);
}

#[test]
fn test_event_draft_normalization() {
    let draft = EventDraft {
        title: "  Midterm  ".to_string(),
        description: Some("   ".to_string()),
        start_date: NaiveDate::from_ymd_opt(2025, 5, 2).unwrap(),
        end_date: None,
        start_time: None,
        end_time: None,
        is_all_day: true,
        event_type: EventType::Exam,
        color_code: Some(String::new()),
        location: Some(" Main hall ".to_string()),
    };

    let normalized = draft.normalized();
    assert_eq!(normalized.title, "Midterm");
    assert_eq!(normalized.description, None);
    assert_eq!(normalized.color_code, None);
    assert_eq!(normalized.location, Some("Main hall".to_string()));
    assert_eq!(
        normalized.end_date,
        Some(NaiveDate::from_ymd_opt(2025, 5, 2).unwrap())
    );
}

#[rstest]
#[case("  Lab work ", "Lab work")]
#[case("Quiz", "Quiz")]
fn test_session_draft_normalization(#[case] raw: &str, #[case] expected: &str) {
    let draft = SessionDraft {
        title: raw.to_string(),
        description: None,
        presenter: Some("".to_string()),
        location: None,
        start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        session_type: " lab ".to_string(),
        color_code: None,
        display_order: 0,
        is_active: true,
        attendance_required: false,
    };

    let normalized = draft.normalized();
    assert_eq!(normalized.title, expected);
    assert_eq!(normalized.presenter, None);
    assert_eq!(normalized.session_type, "lab");
}

#[test]
fn test_type_filter_matching() {
    assert!(TypeFilter::All.matches(EventType::Holiday));
    assert!(TypeFilter::Only(EventType::Exam).matches(EventType::Exam));
    assert!(!TypeFilter::Only(EventType::Exam).matches(EventType::Class));
}

#[test]
fn test_display_item_kind_tag() {
    let parent = Uuid::new_v4();
    let item = DisplayItem {
        kind: ItemKind::Session { event_id: parent },
        id: Uuid::new_v4(),
        title: "Recitation".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
        start_time: NaiveTime::from_hms_opt(14, 0, 0),
        end_time: NaiveTime::from_hms_opt(15, 0, 0),
        event_type: EventType::Class,
        color: "#16a34a".to_string(),
        all_day: false,
        display_order: 0,
        anchor_minutes: 13 * 60,
    };

    assert!(item.is_session());
    assert_eq!(item.parent_event_id(), Some(parent));
    assert_eq!(
        item.timestamp(),
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap()
    );
}
