use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime, Utc};
use eyre::eyre;
use mockall::predicate;
use pretty_assertions::assert_eq;
use uuid::Uuid;

use classtime_core::models::event::{Event, EventType};
use classtime_core::models::session::Session;
use classtime_engine::{EngineConfig, EventStore};
use classtime_provider::memory::MemoryProvider;
use classtime_provider::mock::MockCalendarProvider;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

fn event(title: &str, on: NaiveDate) -> Event {
    Event {
        id: Uuid::new_v4(),
        title: title.to_string(),
        description: None,
        start_date: on,
        end_date: on,
        start_time: Some(time(9, 0)),
        end_time: Some(time(11, 0)),
        is_all_day: false,
        event_type: EventType::Class,
        color_code: None,
        location: None,
        sessions: Vec::new(),
        created_at: Utc::now(),
    }
}

fn session(parent: Uuid, title: &str, start: NaiveTime, order: i32) -> Session {
    Session {
        id: Uuid::new_v4(),
        event_id: parent,
        title: title.to_string(),
        description: None,
        presenter: None,
        location: None,
        start_time: start,
        end_time: time(23, 0),
        session_type: "lecture".to_string(),
        color_code: None,
        display_order: order,
        is_active: true,
        attendance_required: false,
        created_at: Utc::now(),
    }
}

#[test_log::test(tokio::test)]
async fn test_load_nests_sessions_under_events() {
    let provider = Arc::new(MemoryProvider::new());
    let parent = event("Physics", date(2025, 3, 10));
    provider.seed_event(parent.clone());
    provider.seed_session(session(parent.id, "b", time(10, 0), 1));
    provider.seed_session(session(parent.id, "a", time(9, 0), 0));

    let store = EventStore::load(
        provider,
        date(2025, 3, 1),
        date(2025, 3, 31),
        &EngineConfig::default(),
    )
    .await
    .unwrap();

    let loaded = store.event(parent.id).unwrap();
    let titles: Vec<&str> = loaded.sessions.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b"]);
    assert_eq!(store.window(), Some((date(2025, 3, 1), date(2025, 3, 31))));
    assert!(store.session_failures().is_empty());
}

#[tokio::test]
async fn test_event_fetch_failure_aborts_load() {
    let mut mock = MockCalendarProvider::new();
    mock.expect_fetch_events()
        .returning(|_, _| Err(eyre!("backend down")));

    let result = EventStore::load(
        Arc::new(mock),
        date(2025, 3, 1),
        date(2025, 3, 31),
        &EngineConfig::default(),
    )
    .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_session_fetch_failure_is_isolated() {
    let healthy = event("healthy", date(2025, 3, 10));
    let broken = event("broken", date(2025, 3, 11));
    let healthy_id = healthy.id;
    let broken_id = broken.id;
    let healthy_session = session(healthy_id, "ok", time(9, 0), 0);

    let mut mock = MockCalendarProvider::new();
    let events = vec![healthy.clone(), broken.clone()];
    mock.expect_fetch_events()
        .returning(move |_, _| Ok(events.clone()));
    mock.expect_fetch_sessions()
        .with(predicate::eq(healthy_id))
        .returning(move |_| Ok(vec![healthy_session.clone()]));
    mock.expect_fetch_sessions()
        .with(predicate::eq(broken_id))
        .returning(|_| Err(eyre!("timeout")));

    let store = EventStore::load(
        Arc::new(mock),
        date(2025, 3, 1),
        date(2025, 3, 31),
        &EngineConfig::default(),
    )
    .await
    .unwrap();

    // The broken event survives without sessions, and the failure is
    // recorded rather than silently looking like "no sessions".
    assert_eq!(store.events().len(), 2);
    assert_eq!(store.event(healthy_id).unwrap().sessions.len(), 1);
    assert!(store.event(broken_id).unwrap().sessions.is_empty());
    assert!(store.session_failure(broken_id).unwrap().contains("timeout"));
    assert_eq!(store.session_failure(healthy_id), None);
}

#[tokio::test]
async fn test_events_on_filters_by_start_date() {
    let provider = Arc::new(MemoryProvider::new());
    provider.seed_event(event("first", date(2025, 3, 10)));
    provider.seed_event(event("second", date(2025, 3, 10)));
    provider.seed_event(event("elsewhere", date(2025, 3, 12)));

    let store = EventStore::load(
        provider,
        date(2025, 3, 1),
        date(2025, 3, 31),
        &EngineConfig::default(),
    )
    .await
    .unwrap();

    assert_eq!(store.events_on(date(2025, 3, 10)).count(), 2);
    assert_eq!(store.events_on(date(2025, 3, 11)).count(), 0);
}

#[tokio::test]
async fn test_find_session_walks_nested_sessions() {
    let provider = Arc::new(MemoryProvider::new());
    let parent = event("Physics", date(2025, 3, 10));
    let nested = session(parent.id, "Lab", time(9, 0), 0);
    provider.seed_event(parent.clone());
    provider.seed_session(nested.clone());

    let store = EventStore::load(
        provider,
        date(2025, 3, 1),
        date(2025, 3, 31),
        &EngineConfig::default(),
    )
    .await
    .unwrap();

    let (found_event, found_session) = store.find_session(nested.id).unwrap();
    assert_eq!(found_event.id, parent.id);
    assert_eq!(found_session.title, "Lab");
    assert!(store.find_session(Uuid::new_v4()).is_none());
}
