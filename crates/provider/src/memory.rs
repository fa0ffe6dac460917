use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use eyre::{eyre, Result};
use uuid::Uuid;

use classtime_core::models::event::{Event, EventDraft, EventPatch};
use classtime_core::models::session::{Session, SessionDraft, SessionPatch};

use crate::CalendarProvider;

/// In-memory [`CalendarProvider`] used by the demo binary and the
/// integration tests. Events are kept in insertion order so container
/// search over "event enumeration order" is deterministic.
#[derive(Default)]
pub struct MemoryProvider {
    inner: Mutex<State>,
}

#[derive(Default)]
struct State {
    events: Vec<Event>,
    sessions: Vec<Session>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed event, bypassing draft normalization. Test
    /// and demo seeding only.
    pub fn seed_event(&self, event: Event) {
        let mut state = self.inner.lock().unwrap();
        state.events.push(event);
    }

    /// Insert a fully-formed session. Test and demo seeding only.
    pub fn seed_session(&self, session: Session) {
        let mut state = self.inner.lock().unwrap();
        state.sessions.push(session);
    }

    pub fn event_count(&self) -> usize {
        self.inner.lock().unwrap().events.len()
    }

    pub fn session_count(&self) -> usize {
        self.inner.lock().unwrap().sessions.len()
    }
}

#[async_trait]
impl CalendarProvider for MemoryProvider {
    async fn fetch_events(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Event>> {
        let state = self.inner.lock().unwrap();
        let events = state
            .events
            .iter()
            .filter(|e| e.start_date >= from && e.start_date <= to)
            .cloned()
            .map(|mut e| {
                // fetch_events never carries nested sessions
                e.sessions.clear();
                e
            })
            .collect();
        Ok(events)
    }

    async fn fetch_sessions(&self, event_id: Uuid) -> Result<Vec<Session>> {
        let state = self.inner.lock().unwrap();
        let mut sessions: Vec<Session> = state
            .sessions
            .iter()
            .filter(|s| s.event_id == event_id)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| (s.display_order, s.start_time));
        Ok(sessions)
    }

    async fn create_event(&self, draft: EventDraft) -> Result<Event> {
        let draft = draft.normalized();
        let event = Event {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            start_date: draft.start_date,
            end_date: draft.end_date.unwrap_or(draft.start_date),
            start_time: draft.start_time,
            end_time: draft.end_time,
            is_all_day: draft.is_all_day,
            event_type: draft.event_type,
            color_code: draft.color_code,
            location: draft.location,
            sessions: Vec::new(),
            created_at: Utc::now(),
        };

        tracing::debug!(id = %event.id, title = %event.title, "creating event");
        let mut state = self.inner.lock().unwrap();
        state.events.push(event.clone());
        Ok(event)
    }

    async fn update_event(&self, id: Uuid, patch: EventPatch) -> Result<Event> {
        let patch = patch.normalized();
        let mut state = self.inner.lock().unwrap();
        let event = state
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| eyre!("event {id} not found"))?;

        event.title = patch.title;
        event.description = patch.description;
        event.start_date = patch.start_date;
        event.end_date = patch.end_date.unwrap_or(patch.start_date);
        event.start_time = patch.start_time;
        event.end_time = patch.end_time;
        event.is_all_day = patch.is_all_day;
        event.event_type = patch.event_type;
        event.color_code = patch.color_code;
        event.location = patch.location;

        Ok(event.clone())
    }

    async fn delete_event(&self, id: Uuid) -> Result<()> {
        let mut state = self.inner.lock().unwrap();
        let before = state.events.len();
        state.events.retain(|e| e.id != id);
        if state.events.len() == before {
            return Err(eyre!("event {id} not found"));
        }
        // Referential integrity at the store level; the coordinator
        // already deletes owned sessions before the parent.
        state.sessions.retain(|s| s.event_id != id);
        Ok(())
    }

    async fn create_session(&self, event_id: Uuid, draft: SessionDraft) -> Result<Session> {
        let draft = draft.normalized();
        let mut state = self.inner.lock().unwrap();
        if !state.events.iter().any(|e| e.id == event_id) {
            return Err(eyre!("event {event_id} not found"));
        }

        let session = Session {
            id: Uuid::new_v4(),
            event_id,
            title: draft.title,
            description: draft.description,
            presenter: draft.presenter,
            location: draft.location,
            start_time: draft.start_time,
            end_time: draft.end_time,
            session_type: draft.session_type,
            color_code: draft.color_code,
            display_order: draft.display_order,
            is_active: draft.is_active,
            attendance_required: draft.attendance_required,
            created_at: Utc::now(),
        };

        tracing::debug!(id = %session.id, event_id = %event_id, "creating session");
        state.sessions.push(session.clone());
        Ok(session)
    }

    async fn update_session(&self, id: Uuid, patch: SessionPatch) -> Result<Session> {
        let patch = patch.normalized();
        let mut state = self.inner.lock().unwrap();
        let session = state
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| eyre!("session {id} not found"))?;

        session.title = patch.title;
        session.description = patch.description;
        session.presenter = patch.presenter;
        session.location = patch.location;
        session.start_time = patch.start_time;
        session.end_time = patch.end_time;
        session.session_type = patch.session_type;
        session.color_code = patch.color_code;
        session.display_order = patch.display_order;
        session.is_active = patch.is_active;
        session.attendance_required = patch.attendance_required;

        Ok(session.clone())
    }

    async fn delete_session(&self, id: Uuid) -> Result<()> {
        let mut state = self.inner.lock().unwrap();
        let before = state.sessions.len();
        state.sessions.retain(|s| s.id != id);
        if state.sessions.len() == before {
            return Err(eyre!("session {id} not found"));
        }
        Ok(())
    }
}
