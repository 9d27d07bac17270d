use crate::cards::Deck;
use crate::error::RepositoryError;
use crate::report::GameSummary;

/// Deck storage consumed by the tracker.
pub trait DeckRepository: Send + Sync {
    /// Inserts or replaces a player deck.
    fn save(&self, deck: &Deck) -> Result<(), RepositoryError>;

    fn save_arena(&self, deck: &Deck) -> Result<(), RepositoryError>;

    /// Player decks, optionally restricted to one class. The arena and
    /// opponent decks are never listed.
    fn list_decks(&self, class_index: Option<i32>) -> Result<Vec<Deck>, RepositoryError>;

    /// Allocates an empty deck. The deck is not stored until it is saved.
    fn create_deck(&self, class_index: i32) -> Result<Deck, RepositoryError>;

    fn arena_deck(&self) -> Result<Deck, RepositoryError>;

    fn opponent_deck(&self) -> Result<Deck, RepositoryError>;
}

/// Per-deck win/loss counters.
pub trait CounterStore: Send + Sync {
    fn increment(&self, deck_id: &str, wins: u32, losses: u32) -> Result<(), RepositoryError>;

    /// `(wins, losses)` recorded for the deck, zero when never incremented.
    fn counts(&self, deck_id: &str) -> Result<(u32, u32), RepositoryError>;
}

/// Retained match summaries, newest first.
pub trait SummaryStore: Send + Sync {
    /// Adds a summary at the front of the list and returns its id.
    fn prepend(&self, summary: GameSummary) -> Result<u64, RepositoryError>;

    /// Attaches a replay URL to a stored summary and persists the list.
    fn set_replay_url(&self, id: u64, url: &str) -> Result<(), RepositoryError>;

    fn list(&self) -> Result<Vec<GameSummary>, RepositoryError>;
}
