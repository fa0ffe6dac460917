//! The mutation coordinator: the only sanctioned write path.
//!
//! Every operation runs the same gauntlet: privilege gate, validation,
//! remote write, then a wholesale store refresh over the current window.
//! Nothing is patched optimistically; the extra round-trip keeps the
//! store from diverging from the source of truth.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use classtime_core::errors::{CalendarError, CalendarResult};
use classtime_core::models::event::{Event, EventDraft, EventPatch};
use classtime_core::models::session::{Session, SessionDraft, SessionPatch};
use classtime_core::models::view::{Actor, DisplayItem, ViewContext};
use classtime_provider::CalendarProvider;

use crate::config::EngineConfig;
use crate::container::{container_draft, find_host, ContainerKey, ResolvedHost};
use crate::store::EventStore;
use crate::visibility::visible_items;

pub struct Coordinator {
    provider: Arc<dyn CalendarProvider>,
    config: EngineConfig,
    store: EventStore,
    /// Idempotency map for auto-container requests, pruned on refresh to
    /// containers that still exist.
    recent_containers: HashMap<ContainerKey, Uuid>,
}

impl Coordinator {
    pub fn new(provider: Arc<dyn CalendarProvider>, config: EngineConfig) -> Self {
        Self {
            provider,
            config,
            store: EventStore::default(),
            recent_containers: HashMap::new(),
        }
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Rebuilds the store snapshot for the given window.
    pub async fn refresh(&mut self, from: NaiveDate, to: NaiveDate) -> CalendarResult<()> {
        self.store = EventStore::load(Arc::clone(&self.provider), from, to, &self.config).await?;
        let store = &self.store;
        self.recent_containers
            .retain(|_, id| store.event(*id).is_some());
        Ok(())
    }

    /// The ordered display list for a view context, over the current
    /// snapshot.
    pub fn visible(&self, ctx: &ViewContext) -> Vec<DisplayItem> {
        visible_items(&self.store, ctx, &self.config)
    }

    pub async fn create_event(&mut self, actor: Actor, draft: EventDraft) -> CalendarResult<Event> {
        self.require_privilege(actor)?;
        let draft = draft.normalized();
        validate_event(
            &draft.title,
            draft.start_date,
            draft.end_date,
            draft.start_time,
            draft.end_time,
            draft.is_all_day,
        )?;

        let event = self
            .provider
            .create_event(draft)
            .await
            .map_err(CalendarError::Remote)?;
        tracing::debug!(event_id = %event.id, "created event");

        self.refresh_current().await?;
        Ok(event)
    }

    /// Full-replacement update; nested session collections are not
    /// merged or touched.
    pub async fn update_event(
        &mut self,
        actor: Actor,
        id: Uuid,
        patch: EventPatch,
    ) -> CalendarResult<Event> {
        self.require_privilege(actor)?;
        self.store
            .event(id)
            .ok_or_else(|| CalendarError::NotFound(format!("Event with ID {id} not found")))?;

        let patch = patch.normalized();
        validate_event(
            &patch.title,
            patch.start_date,
            patch.end_date,
            patch.start_time,
            patch.end_time,
            patch.is_all_day,
        )?;

        let event = self
            .provider
            .update_event(id, patch)
            .await
            .map_err(CalendarError::Remote)?;

        self.refresh_current().await?;
        Ok(event)
    }

    /// Deletes an event and cascades to every session it owns. The
    /// session list is re-fetched from the provider first, so the
    /// cascade is complete even when the snapshot's auxiliary session
    /// load had failed.
    pub async fn delete_event(&mut self, actor: Actor, id: Uuid) -> CalendarResult<()> {
        self.require_privilege(actor)?;
        self.store
            .event(id)
            .ok_or_else(|| CalendarError::NotFound(format!("Event with ID {id} not found")))?;

        let sessions = self
            .provider
            .fetch_sessions(id)
            .await
            .map_err(CalendarError::Remote)?;
        for session in &sessions {
            self.provider
                .delete_session(session.id)
                .await
                .map_err(CalendarError::Remote)?;
        }
        self.provider
            .delete_event(id)
            .await
            .map_err(CalendarError::Remote)?;
        tracing::debug!(event_id = %id, cascaded = sessions.len(), "deleted event");

        self.refresh_current().await?;
        Ok(())
    }

    /// Creates a session under an explicitly chosen parent event.
    pub async fn create_session(
        &mut self,
        actor: Actor,
        event_id: Uuid,
        draft: SessionDraft,
    ) -> CalendarResult<Session> {
        self.require_privilege(actor)?;
        self.store.event(event_id).ok_or_else(|| {
            CalendarError::NotFound(format!("Event with ID {event_id} not found"))
        })?;

        let draft = draft.normalized();
        validate_session(&draft.title, draft.start_time, draft.end_time)?;

        let session = self
            .provider
            .create_session(event_id, draft)
            .await
            .map_err(CalendarError::Remote)?;

        self.refresh_current().await?;
        Ok(session)
    }

    /// Creates a session scheduled into an empty time slot, resolving or
    /// synthesizing its parent event.
    ///
    /// An identical request (same date, times, and title) re-resolves to
    /// the container created for the first one instead of duplicating
    /// it. When a freshly created container is left behind by a failed
    /// attach, the error carries its id so the caller can surface the
    /// orphan; retrying the same request will attach into it.
    pub async fn create_session_auto(
        &mut self,
        actor: Actor,
        draft: SessionDraft,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> CalendarResult<Session> {
        self.require_privilege(actor)?;
        let draft = draft.normalized().with_times(start, end);
        validate_session(&draft.title, draft.start_time, draft.end_time)?;

        let key = ContainerKey::new(date, start, end, &draft.title);
        let host = self.resolve_host(&key, &draft, date, start, end).await?;

        let session = match self.provider.create_session(host.id(), draft).await {
            Ok(session) => session,
            Err(cause) => {
                return Err(match host {
                    ResolvedHost::Created(event_id) => {
                        CalendarError::ContainerOrphaned { event_id, cause }
                    }
                    ResolvedHost::Existing(_) => CalendarError::Remote(cause),
                });
            }
        };

        self.refresh_current().await?;
        Ok(session)
    }

    pub async fn update_session(
        &mut self,
        actor: Actor,
        id: Uuid,
        patch: SessionPatch,
    ) -> CalendarResult<Session> {
        self.require_privilege(actor)?;
        self.store
            .find_session(id)
            .ok_or_else(|| CalendarError::NotFound(format!("Session with ID {id} not found")))?;

        let patch = patch.normalized();
        validate_session(&patch.title, patch.start_time, patch.end_time)?;

        let session = self
            .provider
            .update_session(id, patch)
            .await
            .map_err(CalendarError::Remote)?;

        self.refresh_current().await?;
        Ok(session)
    }

    /// Deletes one session; the parent event is never touched.
    pub async fn delete_session(&mut self, actor: Actor, id: Uuid) -> CalendarResult<()> {
        self.require_privilege(actor)?;
        self.store
            .find_session(id)
            .ok_or_else(|| CalendarError::NotFound(format!("Session with ID {id} not found")))?;

        self.provider
            .delete_session(id)
            .await
            .map_err(CalendarError::Remote)?;

        self.refresh_current().await?;
        Ok(())
    }

    async fn resolve_host(
        &mut self,
        key: &ContainerKey,
        draft: &SessionDraft,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> CalendarResult<ResolvedHost> {
        if let Some(id) = self.recent_containers.get(key) {
            tracing::debug!(event_id = %id, "reusing container for identical request");
            return Ok(ResolvedHost::Existing(*id));
        }

        let existing = {
            let candidates: Vec<&Event> = self.store.events_on(date).collect();
            find_host(&candidates, start, end, self.config.container_tolerance_min)
                .map(|event| event.id)
        };
        if let Some(id) = existing {
            return Ok(ResolvedHost::Existing(id));
        }

        let container = self
            .provider
            .create_event(container_draft(draft, date, start, end))
            .await
            .map_err(CalendarError::Remote)?;
        tracing::debug!(event_id = %container.id, %date, "synthesized container event");
        self.recent_containers.insert(key.clone(), container.id);
        Ok(ResolvedHost::Created(container.id))
    }

    /// Rebuilds the snapshot over the window it was loaded with. A
    /// no-op before the first explicit refresh.
    async fn refresh_current(&mut self) -> CalendarResult<()> {
        match self.store.window() {
            Some((from, to)) => self.refresh(from, to).await,
            None => Ok(()),
        }
    }

    fn require_privilege(&self, actor: Actor) -> CalendarResult<()> {
        if actor.privileged {
            Ok(())
        } else {
            Err(CalendarError::PermissionDenied(
                "calendar mutations require a privileged caller".to_string(),
            ))
        }
    }
}

fn validate_event(
    title: &str,
    start_date: NaiveDate,
    end_date: Option<NaiveDate>,
    start_time: Option<NaiveTime>,
    end_time: Option<NaiveTime>,
    is_all_day: bool,
) -> CalendarResult<()> {
    if title.is_empty() {
        return Err(CalendarError::Validation("title is required".to_string()));
    }
    if let Some(end_date) = end_date {
        if end_date < start_date {
            return Err(CalendarError::Validation(
                "end date cannot precede start date".to_string(),
            ));
        }
    }
    match (start_time, end_time) {
        (Some(start), Some(end)) => {
            if !is_all_day && start >= end {
                return Err(CalendarError::Validation(
                    "start time must be before end time".to_string(),
                ));
            }
        }
        (None, None) => {}
        _ => {
            return Err(CalendarError::Validation(
                "start and end time must be provided together".to_string(),
            ));
        }
    }
    Ok(())
}

fn validate_session(title: &str, start: NaiveTime, end: NaiveTime) -> CalendarResult<()> {
    if title.is_empty() {
        return Err(CalendarError::Validation("title is required".to_string()));
    }
    if start >= end {
        return Err(CalendarError::Validation(
            "start time must be before end time".to_string(),
        ));
    }
    Ok(())
}
