//! Demo driver: seeds an in-memory provider with a day of class
//! activity and walks the engine through the month/week/day views plus
//! an auto-container session creation.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use color_eyre::eyre::{eyre, Result};
use dotenv::dotenv;
use tracing::info;

use classtime_core::models::event::{EventDraft, EventType};
use classtime_core::models::session::SessionDraft;
use classtime_core::models::view::{Actor, CalendarView, ViewContext};
use classtime_engine::{Coordinator, EngineConfig};
use classtime_provider::memory::MemoryProvider;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = EngineConfig::from_env()?;
    let provider = Arc::new(MemoryProvider::new());
    let mut coordinator = Coordinator::new(provider, config);

    let admin = Actor::privileged();
    let monday = NaiveDate::from_ymd_opt(2026, 3, 9).ok_or_else(|| eyre!("bad seed date"))?;

    // A window wide enough for the month grid around the anchor.
    coordinator
        .refresh(
            monday - chrono::Duration::days(31),
            monday + chrono::Duration::days(31),
        )
        .await?;

    let algorithms = coordinator
        .create_event(
            admin,
            EventDraft {
                title: "Algorithms Lecture".to_string(),
                description: Some("Greedy algorithms and exchange arguments".to_string()),
                start_date: monday,
                end_date: None,
                start_time: NaiveTime::from_hms_opt(13, 0, 0),
                end_time: NaiveTime::from_hms_opt(15, 0, 0),
                is_all_day: false,
                event_type: EventType::Class,
                color_code: None,
                location: Some("Hall B".to_string()),
            },
        )
        .await?;
    info!(id = %algorithms.id, "seeded timed class event");

    coordinator
        .create_session(
            admin,
            algorithms.id,
            SessionDraft {
                title: "Problem session".to_string(),
                description: None,
                presenter: Some("T. Okafor".to_string()),
                location: None,
                start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
                session_type: "lab".to_string(),
                color_code: None,
                display_order: 1,
                is_active: true,
                attendance_required: true,
            },
        )
        .await?;

    // Empty-slot scheduling: no event exists at 10:00, so the engine
    // synthesizes a container and attaches the session to it.
    let study_group = coordinator
        .create_session_auto(
            admin,
            SessionDraft {
                title: "Study group".to_string(),
                description: None,
                presenter: None,
                location: Some("Library".to_string()),
                start_time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
                end_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
                session_type: "workshop".to_string(),
                color_code: None,
                display_order: 0,
                is_active: true,
                attendance_required: false,
            },
            monday,
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        )
        .await?;
    info!(
        session_id = %study_group.id,
        event_id = %study_group.event_id,
        "auto-container attach"
    );

    for view in [CalendarView::Month, CalendarView::Week, CalendarView::Day] {
        let items = coordinator.visible(&ViewContext::new(view, monday));
        info!(?view, count = items.len(), "visible items");
        for item in items {
            info!(
                kind = ?item.kind,
                title = %item.title,
                date = %item.date,
                start = ?item.start_time,
                "  item"
            );
        }
    }

    Ok(())
}
