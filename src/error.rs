use std::time::Duration;

/// Errors raised by deck, counter and summary storage.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository lock poisoned during {0}")]
    LockPoisoned(&'static str),

    #[error("deck {0} not found")]
    DeckNotFound(String),

    #[error("summary {0} not found")]
    SummaryNotFound(u64),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors raised by the reporting client.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("upload rejected: {0}")]
    Rejected(String),

    #[error("no reporting identity")]
    NoIdentity,
}

/// Errors raised by the analytics sink.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyticsError {
    #[error("analytics buffer poisoned")]
    BufferPoisoned,

    #[error("analytics event rejected: {0}")]
    Rejected(String),
}

/// Top-level errors of the match tracker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("invalid match: {reason}")]
    InvalidMatch { reason: String },

    #[error(transparent)]
    Persistence(#[from] RepositoryError),

    #[error(transparent)]
    Reporting(#[from] UploadError),

    #[error("timed out after {waited:?} waiting for the game to finish")]
    Timeout { waited: Duration },
}

impl TrackerError {
    pub(crate) fn invalid_match(reason: impl Into<String>) -> Self {
        TrackerError::InvalidMatch {
            reason: reason.into(),
        }
    }
}
