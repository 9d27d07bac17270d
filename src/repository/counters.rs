use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::repository::CounterStore;
use crate::error::RepositoryError;

/// In-memory win/loss counters keyed by deck id.
#[derive(Clone, Default)]
pub struct InMemoryCounterStore {
    counts: Arc<RwLock<HashMap<String, (u32, u32)>>>,
}

impl InMemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CounterStore for InMemoryCounterStore {
    fn increment(&self, deck_id: &str, wins: u32, losses: u32) -> Result<(), RepositoryError> {
        let mut counts = self
            .counts
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("counter write"))?;
        let entry = counts.entry(deck_id.to_string()).or_insert((0, 0));
        entry.0 += wins;
        entry.1 += losses;
        Ok(())
    }

    fn counts(&self, deck_id: &str) -> Result<(u32, u32), RepositoryError> {
        let counts = self
            .counts
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("counter read"))?;
        Ok(counts.get(deck_id).copied().unwrap_or((0, 0)))
    }
}

/// Counter store used while migrating between storage generations.
///
/// Every increment goes to both stores; reads come from `current`. A failed
/// write to `legacy` is logged and does not fail the increment.
pub struct DualWriteCounters<C, L> {
    current: C,
    legacy: L,
}

impl<C, L> DualWriteCounters<C, L> {
    pub fn new(current: C, legacy: L) -> Self {
        DualWriteCounters { current, legacy }
    }

    pub fn current(&self) -> &C {
        &self.current
    }

    pub fn legacy(&self) -> &L {
        &self.legacy
    }
}

impl<C: CounterStore, L: CounterStore> CounterStore for DualWriteCounters<C, L> {
    fn increment(&self, deck_id: &str, wins: u32, losses: u32) -> Result<(), RepositoryError> {
        self.current.increment(deck_id, wins, losses)?;
        if let Err(err) = self.legacy.increment(deck_id, wins, losses) {
            tracing::warn!(deck = deck_id, error = %err, "legacy counter write failed");
        }
        Ok(())
    }

    fn counts(&self, deck_id: &str) -> Result<(u32, u32), RepositoryError> {
        self.current.counts(deck_id)
    }
}
