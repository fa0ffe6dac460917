//! Windowed in-memory projection of the remote calendar.
//!
//! The store is always rebuilt wholesale from the provider, never
//! patched in place, so the visibility filter only ever observes a
//! consistent snapshot.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::task::JoinSet;
use uuid::Uuid;

use classtime_core::errors::{CalendarError, CalendarResult};
use classtime_core::models::event::Event;
use classtime_core::models::session::Session;
use classtime_provider::CalendarProvider;

use crate::config::EngineConfig;

#[derive(Default)]
pub struct EventStore {
    events: Vec<Event>,
    window: Option<(NaiveDate, NaiveDate)>,
    session_failures: HashMap<Uuid, String>,
}

impl EventStore {
    /// Fetches events for `[from, to]` and their sessions, producing a
    /// fresh snapshot.
    ///
    /// The event fetch is authoritative: a failure there aborts the
    /// load. Per-event session fetches are best-effort auxiliary reads,
    /// issued as a bounded concurrent batch: a failure for one event
    /// keeps that event without sessions and records the reason, so
    /// callers can tell "no sessions" apart from "failed to load".
    pub async fn load(
        provider: Arc<dyn CalendarProvider>,
        from: NaiveDate,
        to: NaiveDate,
        config: &EngineConfig,
    ) -> CalendarResult<Self> {
        let mut events = provider
            .fetch_events(from, to)
            .await
            .map_err(CalendarError::Remote)?;

        tracing::debug!(%from, %to, count = events.len(), "loaded events");

        let mut outcomes: HashMap<Uuid, Result<Vec<Session>, String>> = HashMap::new();
        let mut pending: VecDeque<Uuid> = events.iter().map(|e| e.id).collect();
        let mut in_flight = JoinSet::new();
        let limit = config.fetch_concurrency.max(1);

        loop {
            while in_flight.len() < limit {
                let Some(id) = pending.pop_front() else { break };
                let provider = Arc::clone(&provider);
                in_flight.spawn(async move { (id, provider.fetch_sessions(id).await) });
            }

            let Some(joined) = in_flight.join_next().await else {
                break;
            };
            match joined {
                Ok((id, Ok(sessions))) => {
                    outcomes.insert(id, Ok(sessions));
                }
                Ok((id, Err(err))) => {
                    // Swallowed by policy, but never silently: the event
                    // is kept without sessions and the failure recorded.
                    tracing::warn!(
                        event_id = %id,
                        error = %err,
                        "failed to load sessions for event; treating as none"
                    );
                    outcomes.insert(id, Err(err.to_string()));
                }
                Err(join_err) => {
                    tracing::warn!(error = %join_err, "session fetch task failed to run");
                }
            }
        }

        let mut session_failures = HashMap::new();
        for event in &mut events {
            match outcomes.remove(&event.id) {
                Some(Ok(mut sessions)) => {
                    sessions.sort_by_key(|s| (s.display_order, s.start_time));
                    event.sessions = sessions;
                }
                Some(Err(reason)) => {
                    event.sessions.clear();
                    session_failures.insert(event.id, reason);
                }
                None => event.sessions.clear(),
            }
        }

        Ok(Self {
            events,
            window: Some((from, to)),
            session_failures,
        })
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: Uuid) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events whose `start_date` is exactly `date`, in enumeration order.
    pub fn events_on(&self, date: NaiveDate) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(move |e| e.start_date == date)
    }

    pub fn find_session(&self, id: Uuid) -> Option<(&Event, &Session)> {
        self.events.iter().find_map(|event| {
            event
                .sessions
                .iter()
                .find(|s| s.id == id)
                .map(|session| (event, session))
        })
    }

    /// The fetch window this snapshot covers, if it has been loaded.
    pub fn window(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.window
    }

    /// Why sessions are missing for an event, when the auxiliary fetch
    /// failed rather than returning none.
    pub fn session_failure(&self, event_id: Uuid) -> Option<&str> {
        self.session_failures.get(&event_id).map(String::as_str)
    }

    pub fn session_failures(&self) -> &HashMap<Uuid, String> {
        &self.session_failures
    }
}
