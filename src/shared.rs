use std::sync::{Arc, RwLock};

use crate::cards::Deck;
use crate::error::RepositoryError;

/// A deck shared between the tracker (sole writer) and UI readers.
///
/// Writers build a new deck and swap it in whole, so readers holding a
/// snapshot never see a half-applied update.
#[derive(Debug, Clone)]
pub struct SharedDeck {
    current: Arc<RwLock<Arc<Deck>>>,
}

impl SharedDeck {
    pub fn new(deck: Deck) -> Self {
        SharedDeck {
            current: Arc::new(RwLock::new(Arc::new(deck))),
        }
    }

    pub fn snapshot(&self) -> Result<Arc<Deck>, RepositoryError> {
        let current = self
            .current
            .read()
            .map_err(|_| RepositoryError::LockPoisoned("shared deck read"))?;
        Ok(Arc::clone(&current))
    }

    /// Replaces the published deck, returning the previous one.
    pub fn publish(&self, deck: Deck) -> Result<Arc<Deck>, RepositoryError> {
        let mut current = self
            .current
            .write()
            .map_err(|_| RepositoryError::LockPoisoned("shared deck write"))?;
        Ok(std::mem::replace(&mut *current, Arc::new(deck)))
    }
}
