use async_trait::async_trait;
use chrono::NaiveDate;
use eyre::Result;
use mockall::mock;
use uuid::Uuid;

use classtime_core::models::event::{Event, EventDraft, EventPatch};
use classtime_core::models::session::{Session, SessionDraft, SessionPatch};

use crate::CalendarProvider;

// Mock provider for testing engine orchestration without a backend.
mock! {
    pub CalendarProvider {}

    #[async_trait]
    impl CalendarProvider for CalendarProvider {
        async fn fetch_events(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Event>>;

        async fn fetch_sessions(&self, event_id: Uuid) -> Result<Vec<Session>>;

        async fn create_event(&self, draft: EventDraft) -> Result<Event>;

        async fn update_event(&self, id: Uuid, patch: EventPatch) -> Result<Event>;

        async fn delete_event(&self, id: Uuid) -> Result<()>;

        async fn create_session(&self, event_id: Uuid, draft: SessionDraft) -> Result<Session>;

        async fn update_session(&self, id: Uuid, patch: SessionPatch) -> Result<Session>;

        async fn delete_session(&self, id: Uuid) -> Result<()>;
    }
}
