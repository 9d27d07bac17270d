use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use super::client::{LogNotifier, Notice, Notifier, ReportingClient};
use super::summary::GameSummary;
use super::upload::UploadRequest;
use crate::clock::{iso8601, Clock, SystemClock};
use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::record::FinishedMatch;
use crate::repository::SummaryStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded { url: String },
    /// Spectated matches are never uploaded.
    Skipped,
}

/// Uploads finished matches and records them in the summary list.
pub struct ResultReporter {
    client: Arc<dyn ReportingClient>,
    summaries: Arc<dyn SummaryStore>,
    notifier: Arc<dyn Notifier>,
    clock: Arc<dyn Clock>,
    build: Option<String>,
    finish_wait: Duration,
}

impl ResultReporter {
    pub fn new(client: Arc<dyn ReportingClient>, summaries: Arc<dyn SummaryStore>) -> Self {
        ResultReporter {
            client,
            summaries,
            notifier: Arc::new(LogNotifier),
            clock: Arc::new(SystemClock),
            build: None,
            finish_wait: Duration::from_secs(30),
        }
    }

    /// Takes the build and finish wait from the tracker config.
    pub fn with_config(mut self, config: &TrackerConfig) -> Self {
        self.build = config.build.clone();
        self.finish_wait = config.finish_wait();
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    pub fn with_finish_wait(mut self, wait: Duration) -> Self {
        self.finish_wait = wait;
        self
    }

    /// Records the match summary and uploads the replay.
    ///
    /// Upload failures are shown to the user and returned; they are not
    /// retried.
    pub async fn report(
        &self,
        finished: &FinishedMatch,
        game_log: String,
        match_start: &str,
    ) -> Result<UploadOutcome, TrackerError> {
        let summary = GameSummary::from_finished(finished, iso8601(self.clock.now()));
        let summary_id = match self.summaries.prepend(summary) {
            Ok(id) => Some(id),
            Err(err) => {
                tracing::warn!(error = %err, "failed to store game summary");
                None
            }
        };

        if finished.record.spectator {
            tracing::info!("spectated game, skipping upload");
            return Ok(UploadOutcome::Skipped);
        }

        let request = UploadRequest::from_finished(finished, match_start, self.build.clone());
        tracing::debug!(game_type = request.game_type, "uploading replay");

        match self.client.upload_game(request, game_log).await {
            Ok(ack) => {
                if let Some(id) = summary_id {
                    if let Err(err) = self.summaries.set_replay_url(id, &ack.url) {
                        tracing::warn!(error = %err, "failed to attach replay url");
                    }
                }
                tracing::debug!(url = %ack.url, "replay upload success");
                self.notifier.notify(Notice::UploadSucceeded {
                    url: ack.url.clone(),
                });
                Ok(UploadOutcome::Uploaded { url: ack.url })
            }
            Err(err) => {
                tracing::warn!(error = %err, "replay upload failed");
                self.notifier.notify(Notice::UploadFailed {
                    reason: err.to_string(),
                });
                Err(err.into())
            }
        }
    }

    /// Waits for the controller to publish a finished match, then reports it.
    ///
    /// Gives up after the configured wait with an error log only; the user
    /// is not notified.
    pub async fn report_when_finished(
        &self,
        mut finished: watch::Receiver<Option<FinishedMatch>>,
        game_log: String,
        match_start: &str,
    ) -> Result<UploadOutcome, TrackerError> {
        let waited = self.finish_wait;
        let current = match tokio::time::timeout(waited, finished.wait_for(Option::is_some)).await
        {
            Ok(Ok(current)) => current.clone(),
            Ok(Err(_)) => {
                tracing::error!("tracker shut down before the game finished");
                return Err(TrackerError::invalid_match("tracker shut down"));
            }
            Err(_) => {
                tracing::error!(?waited, "timeout waiting for game to finish");
                return Err(TrackerError::Timeout { waited });
            }
        };

        match current {
            Some(finished) => self.report(&finished, game_log, match_start).await,
            None => Err(TrackerError::invalid_match("no finished game")),
        }
    }
}
