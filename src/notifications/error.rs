use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    /// Unrecognized kind name. `notify` never surfaces this; it coerces to `info`.
    #[error("Invalid notification kind: {0}")]
    InvalidKind(String),

    #[error("Notification worker failed: {0}")]
    WorkerFailed(#[from] tokio::task::JoinError),
}

pub type NotificationResult<T> = Result<T, NotificationError>;
