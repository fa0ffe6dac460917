//! # ClassTime Provider
//!
//! The boundary between the scheduling engine and whatever actually
//! stores calendar data. The engine only ever talks to a
//! [`CalendarProvider`]; HTTP clients, databases, and test doubles all
//! live behind this trait.

pub mod memory;
pub mod mock;

use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use uuid::Uuid;

use classtime_core::models::event::{Event, EventDraft, EventPatch};
use classtime_core::models::session::{Session, SessionDraft, SessionPatch};

/// External source of truth for events and sessions.
///
/// `fetch_events` returns events *without* their sessions; sessions are
/// fetched per event via `fetch_sessions`. Deleting an event is not
/// required to cascade here: the engine's mutation coordinator deletes
/// owned sessions explicitly before deleting the parent.
#[async_trait]
pub trait CalendarProvider: Send + Sync {
    /// Events whose `start_date` falls within `[from, to]`, in stable
    /// enumeration order.
    async fn fetch_events(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Event>>;

    /// Sessions owned by one event, ordered by display order then start.
    async fn fetch_sessions(&self, event_id: Uuid) -> Result<Vec<Session>>;

    async fn create_event(&self, draft: EventDraft) -> Result<Event>;

    async fn update_event(&self, id: Uuid, patch: EventPatch) -> Result<Event>;

    async fn delete_event(&self, id: Uuid) -> Result<()>;

    async fn create_session(&self, event_id: Uuid, draft: SessionDraft) -> Result<Session>;

    async fn update_session(&self, id: Uuid, patch: SessionPatch) -> Result<Session>;

    async fn delete_session(&self, id: Uuid) -> Result<()>;
}
