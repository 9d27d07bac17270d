use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::MAX_CARDS;
use crate::error::RepositoryError;

/// Tracker settings. Missing JSON fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Pick the deck in play from the opening hand. Default: true.
    pub auto_select_deck: bool,
    /// Fold cards revealed during the match into the deck. Default: true.
    pub auto_add_cards: bool,
    /// Deck size used by matching and enrichment. Default: 30.
    pub max_deck_cards: usize,
    /// Report results for every mode, not only arena and play mode. Default: false.
    pub debug_reporting: bool,
    /// How long a replay upload waits for the match to finish, in
    /// milliseconds. Default: 30000.
    pub finish_wait_ms: u64,
    /// Game client build embedded in upload payloads.
    pub build: Option<String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            auto_select_deck: true,
            auto_add_cards: true,
            max_deck_cards: MAX_CARDS,
            debug_reporting: false,
            finish_wait_ms: 30_000,
            build: None,
        }
    }
}

impl TrackerConfig {
    pub fn from_json(json: &str) -> Result<Self, RepositoryError> {
        serde_json::from_str(json).map_err(|err| RepositoryError::Codec(err.to_string()))
    }

    pub fn with_auto_select_deck(mut self, enabled: bool) -> Self {
        self.auto_select_deck = enabled;
        self
    }

    pub fn with_auto_add_cards(mut self, enabled: bool) -> Self {
        self.auto_add_cards = enabled;
        self
    }

    pub fn with_debug_reporting(mut self, enabled: bool) -> Self {
        self.debug_reporting = enabled;
        self
    }

    pub fn with_finish_wait(mut self, wait: Duration) -> Self {
        self.finish_wait_ms = u64::try_from(wait.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_build(mut self, build: impl Into<String>) -> Self {
        self.build = Some(build.into());
        self
    }

    pub fn finish_wait(&self) -> Duration {
        Duration::from_millis(self.finish_wait_ms)
    }
}
