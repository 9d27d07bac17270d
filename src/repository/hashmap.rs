use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use super::repository::DeckRepository;
use crate::cards::{hero_name, Deck, ARENA_DECK_ID, OPPONENT_DECK_ID};
use crate::error::RepositoryError;

#[derive(Serialize, Deserialize)]
struct StoredDecks {
    decks: Vec<Deck>,
    arena: Deck,
    next_id: u64,
}

/// In-memory deck store. Clones share the same storage.
#[derive(Clone)]
pub struct HashMapDeckRepository {
    decks: Arc<RwLock<Vec<Deck>>>,
    arena: Arc<RwLock<Deck>>,
    opponent: Arc<RwLock<Deck>>,
    deck_seq: Arc<AtomicU64>,
}

impl Default for HashMapDeckRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl HashMapDeckRepository {
    pub fn new() -> Self {
        HashMapDeckRepository {
            decks: Arc::new(RwLock::new(Vec::new())),
            arena: Arc::new(RwLock::new(Deck::new(ARENA_DECK_ID, -1).with_name("Arena"))),
            opponent: Arc::new(RwLock::new(Deck::new(OPPONENT_DECK_ID, -1).with_name("Opponent"))),
            deck_seq: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Builds a repository already holding `decks`.
    pub fn with_decks(decks: impl IntoIterator<Item = Deck>) -> Self {
        let repo = Self::new();
        if let Ok(mut stored) = repo.decks.write() {
            stored.extend(decks);
        }
        repo
    }

    /// Encodes player decks and the arena deck with `bitcode`.
    pub fn snapshot(&self) -> Result<Vec<u8>, RepositoryError> {
        let decks = self
            .decks
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("snapshot"))?;
        let arena = self
            .arena
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("snapshot arena"))?;

        let stored = StoredDecks {
            decks: decks.clone(),
            arena: arena.clone(),
            next_id: self.deck_seq.load(Ordering::Relaxed),
        };
        bitcode::serialize(&stored).map_err(|err| RepositoryError::Codec(err.to_string()))
    }

    /// Rebuilds a repository from [`snapshot`](Self::snapshot) output.
    pub fn restore(bytes: &[u8]) -> Result<Self, RepositoryError> {
        let stored: StoredDecks =
            bitcode::deserialize(bytes).map_err(|err| RepositoryError::Codec(err.to_string()))?;

        let repo = Self::new();
        *repo
            .decks
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("restore"))? = stored.decks;
        *repo
            .arena
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("restore arena"))? = stored.arena;
        repo.deck_seq.store(stored.next_id, Ordering::Relaxed);
        Ok(repo)
    }

    pub fn get(&self, id: &str) -> Result<Option<Deck>, RepositoryError> {
        let decks = self
            .decks
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;
        Ok(decks.iter().find(|deck| deck.id == id).cloned())
    }
}

impl DeckRepository for HashMapDeckRepository {
    fn save(&self, deck: &Deck) -> Result<(), RepositoryError> {
        if deck.is_arena() {
            return self.save_arena(deck);
        }

        let mut decks = self
            .decks
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("write"))?;
        match decks.iter_mut().find(|stored| stored.id == deck.id) {
            Some(stored) => *stored = deck.clone(),
            None => decks.push(deck.clone()),
        }
        Ok(())
    }

    fn save_arena(&self, deck: &Deck) -> Result<(), RepositoryError> {
        let mut arena = self
            .arena
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("arena write"))?;
        *arena = deck.clone();
        Ok(())
    }

    fn list_decks(&self, class_index: Option<i32>) -> Result<Vec<Deck>, RepositoryError> {
        let decks = self
            .decks
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("read"))?;
        Ok(decks
            .iter()
            .filter(|deck| class_index.map_or(true, |class| deck.class_index == class))
            .cloned()
            .collect())
    }

    fn create_deck(&self, class_index: i32) -> Result<Deck, RepositoryError> {
        let seq = self.deck_seq.fetch_add(1, Ordering::Relaxed);
        Ok(Deck::new(format!("deck-{}", seq), class_index)
            .with_name(format!("{} {}", hero_name(class_index), seq)))
    }

    fn arena_deck(&self) -> Result<Deck, RepositoryError> {
        let arena = self
            .arena
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("arena read"))?;
        Ok(arena.clone())
    }

    fn opponent_deck(&self) -> Result<Deck, RepositoryError> {
        let opponent = self
            .opponent
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("opponent read"))?;
        Ok(opponent.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::CardMultiset;

    #[test]
    fn new() {
        let repo = HashMapDeckRepository::new();
        assert!(repo.list_decks(None).unwrap().is_empty());
        assert!(repo.arena_deck().unwrap().is_arena());
    }

    #[test]
    fn save_replaces_by_id() {
        let repo = HashMapDeckRepository::new();
        let mut deck = Deck::new("d1", 2);
        repo.save(&deck).unwrap();

        deck.cards.set("X", 2);
        repo.save(&deck).unwrap();

        let decks = repo.list_decks(None).unwrap();
        assert_eq!(decks.len(), 1);
        assert_eq!(decks[0].cards.get("X"), 2);
    }

    #[test]
    fn list_filters_by_class() {
        let repo = HashMapDeckRepository::with_decks([
            Deck::new("a", 1),
            Deck::new("b", 2),
            Deck::new("c", 2),
        ]);
        let ids: Vec<String> = repo
            .list_decks(Some(2))
            .unwrap()
            .into_iter()
            .map(|deck| deck.id)
            .collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn created_decks_are_not_stored() {
        let repo = HashMapDeckRepository::new();
        let first = repo.create_deck(4).unwrap();
        let second = repo.create_deck(4).unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.class_index, 4);
        assert!(first.cards.is_empty());
        assert!(repo.list_decks(None).unwrap().is_empty());
    }

    #[test]
    fn arena_deck_saved_through_save() {
        let repo = HashMapDeckRepository::new();
        let mut arena = repo.arena_deck().unwrap();
        arena.wins = 3;
        repo.save(&arena).unwrap();

        assert_eq!(repo.arena_deck().unwrap().wins, 3);
        assert!(repo.list_decks(None).unwrap().is_empty());
    }

    #[test]
    fn snapshot_restores_decks() {
        let cards: CardMultiset = [("X", 2)].into_iter().collect();
        let repo = HashMapDeckRepository::with_decks([Deck::new("d1", 2)
            .with_cards(cards)
            .with_record(4, 2)]);
        repo.create_deck(2).unwrap();

        let bytes = repo.snapshot().unwrap();
        let restored = HashMapDeckRepository::restore(&bytes).unwrap();

        assert_eq!(restored.list_decks(None).unwrap(), repo.list_decks(None).unwrap());
        assert_eq!(restored.create_deck(2).unwrap().id, "deck-2");
    }

    #[test]
    fn clones_share_storage() {
        let repo = HashMapDeckRepository::new();
        let handle = repo.clone();
        handle.save(&Deck::new("d1", 0)).unwrap();
        assert!(repo.get("d1").unwrap().is_some());
    }
}
