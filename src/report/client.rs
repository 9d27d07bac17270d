use async_trait::async_trait;

use super::summary::ResultData;
use super::upload::{UploadAck, UploadRequest};
use crate::error::UploadError;

/// Account the results are reported under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
}

impl Identity {
    pub fn new(username: impl Into<String>) -> Self {
        Identity {
            username: username.into(),
        }
    }
}

/// Remote services that receive match results and replays.
#[async_trait]
pub trait ReportingClient: Send + Sync {
    fn current_identity(&self) -> Option<Identity>;

    async fn send_result(&self, result: ResultData) -> Result<(), UploadError>;

    async fn upload_game(
        &self,
        request: UploadRequest,
        game_log: String,
    ) -> Result<UploadAck, UploadError>;
}

/// Short, non-blocking notices for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    UploadSucceeded { url: String },
    UploadFailed { reason: String },
    ResultFailed { reason: String },
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Notifier that only writes to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice {
            Notice::UploadSucceeded { url } => tracing::info!(%url, "replay uploaded"),
            Notice::UploadFailed { reason } => tracing::warn!(%reason, "replay upload failed"),
            Notice::ResultFailed { reason } => tracing::warn!(%reason, "result upload failed"),
        }
    }
}
