//! Live match tracking for a collectible card game.
//!
//! The log parser feeds lifecycle events into a [`GameLifecycleController`],
//! which picks the deck in play from the opening hand, folds revealed cards
//! into it when the match ends, classifies the match and hands results to
//! the reporting services.

pub mod analytics;
mod cards;
mod classifier;
mod clock;
mod config;
mod controller;
mod enricher;
mod entity;
mod error;
mod listener;
mod matcher;
mod record;
pub mod report;
pub mod repository;
mod selector;
mod shared;

pub use analytics::{AnalyticsSink, LogAnalytics, Properties};
#[cfg(feature = "emitter")]
pub use analytics::EmitterAnalytics;
pub use cards::{
    hero_name, CardMultiset, CardPlay, Deck, Side, ARENA_DECK_ID, MAX_CARDS, OPPONENT_DECK_ID,
};
pub use classifier::{classify, Format, GameType, GameplayMode, MatchCategory, Mode, ModeSignals};
pub use clock::{iso8601, Clock, FixedClock, SystemClock};
pub use config::TrackerConfig;
pub use controller::{GameLifecycleController, Transition};
pub use enricher::{enrich, CardRaise};
pub use entity::{
    card_map, hand_snapshot, revealed_snapshot, Entity, EntityView, Game, Player, Zone,
    KEY_CONTROLLER, KEY_PLAYER_ID, KEY_ZONE,
};
pub use error::{AnalyticsError, RepositoryError, TrackerError, UploadError};
pub use listener::GameListener;
pub use matcher::{score, score_with_cap, Score};
pub use record::{FinishedMatch, LifecycleState, MatchRecord, PlayerSummary};
pub use report::{ResultReporter, UploadOutcome};
pub use repository::{CounterStore, DeckRepository, HashMapDeckRepository, SummaryStore};
pub use selector::{DeckSelector, Selection, SelectionReason};
pub use shared::SharedDeck;

// Re-export the EventEmitter so hosts can subscribe without another dependency
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
