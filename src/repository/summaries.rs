use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use super::repository::SummaryStore;
use crate::error::RepositoryError;
use crate::report::GameSummary;

/// In-memory summary list. Clones share the same storage.
#[derive(Clone)]
pub struct InMemorySummaryStore {
    summaries: Arc<RwLock<Vec<(u64, GameSummary)>>>,
    summary_seq: Arc<AtomicU64>,
}

impl Default for InMemorySummaryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySummaryStore {
    pub fn new() -> Self {
        InMemorySummaryStore {
            summaries: Arc::new(RwLock::new(Vec::new())),
            summary_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    /// JSON export of the list, newest first.
    pub fn to_json(&self) -> Result<String, RepositoryError> {
        let summaries = self.list()?;
        serde_json::to_string(&summaries).map_err(|err| RepositoryError::Codec(err.to_string()))
    }
}

impl SummaryStore for InMemorySummaryStore {
    fn prepend(&self, summary: GameSummary) -> Result<u64, RepositoryError> {
        let mut summaries = self
            .summaries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("summary write"))?;
        let id = self.summary_seq.fetch_add(1, Ordering::Relaxed);
        summaries.insert(0, (id, summary));
        Ok(id)
    }

    fn set_replay_url(&self, id: u64, url: &str) -> Result<(), RepositoryError> {
        let mut summaries = self
            .summaries
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("summary write"))?;
        let (_, summary) = summaries
            .iter_mut()
            .find(|(stored, _)| *stored == id)
            .ok_or(RepositoryError::SummaryNotFound(id))?;
        summary.replay_url = Some(url.to_string());
        Ok(())
    }

    fn list(&self) -> Result<Vec<GameSummary>, RepositoryError> {
        let summaries = self
            .summaries
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("summary read"))?;
        Ok(summaries.iter().map(|(_, summary)| summary.clone()).collect())
    }
}
