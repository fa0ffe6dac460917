use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Remote call failed: {0}")]
    Remote(eyre::Report),

    /// The auto-container flow created a host event but failed to attach
    /// the session to it. The orphaned container id is carried so the
    /// caller can surface or clean it up.
    #[error("Container event {event_id} was created but attaching the session failed: {cause}")]
    ContainerOrphaned { event_id: Uuid, cause: eyre::Report },
}

impl From<eyre::Report> for CalendarError {
    fn from(report: eyre::Report) -> Self {
        CalendarError::Remote(report)
    }
}

pub type CalendarResult<T> = Result<T, CalendarError>;
