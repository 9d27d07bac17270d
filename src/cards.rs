//! Card counts, decks and card plays.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Maximum number of cards in a constructed deck.
pub const MAX_CARDS: usize = 30;

/// Identifier of the dedicated arena deck.
pub const ARENA_DECK_ID: &str = "arena";

/// Identifier of the deck rebuilt from opponent observations.
pub const OPPONENT_DECK_ID: &str = "opponent";

/// Mapping from card id to copy count.
///
/// Zero counts are never stored, so `len()` is the number of distinct cards
/// actually present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardMultiset(BTreeMap<String, u32>);

impl CardMultiset {
    pub fn new() -> Self {
        CardMultiset(BTreeMap::new())
    }

    /// Counts one copy per id.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cards = CardMultiset::new();
        for card_id in ids {
            cards.add(card_id, 1);
        }
        cards
    }

    pub fn get(&self, card_id: &str) -> u32 {
        self.0.get(card_id).copied().unwrap_or(0)
    }

    pub fn set(&mut self, card_id: impl Into<String>, count: u32) {
        let card_id = card_id.into();
        if count == 0 {
            self.0.remove(&card_id);
        } else {
            self.0.insert(card_id, count);
        }
    }

    pub fn add(&mut self, card_id: impl Into<String>, count: u32) {
        if count == 0 {
            return;
        }
        *self.0.entry(card_id.into()).or_insert(0) += count;
    }

    /// Removes up to `count` copies, returning how many were removed.
    pub fn remove(&mut self, card_id: &str, count: u32) -> u32 {
        let current = self.get(card_id);
        let removed = current.min(count);
        self.set(card_id, current - removed);
        removed
    }

    /// Total number of cards, counting every copy.
    pub fn total(&self) -> usize {
        self.0.values().map(|count| *count as usize).sum()
    }

    /// Number of distinct card ids.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(id, count)| (id.as_str(), *count))
    }

    /// One entry per copy, in card id order.
    pub fn expand(&self) -> Vec<String> {
        self.0
            .iter()
            .flat_map(|(id, count)| std::iter::repeat(id.clone()).take(*count as usize))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for CardMultiset {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut cards = CardMultiset::new();
        for (card_id, count) in iter {
            cards.add(card_id, count);
        }
        cards
    }
}

impl<'a> IntoIterator for &'a CardMultiset {
    type Item = (&'a String, &'a u32);
    type IntoIter = btree_map::Iter<'a, String, u32>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A tracked deck with its known cards and cumulative record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub id: String,
    pub name: String,
    pub class_index: i32,
    pub cards: CardMultiset,
    pub wins: u32,
    pub losses: u32,
}

impl Deck {
    pub fn new(id: impl Into<String>, class_index: i32) -> Self {
        let id = id.into();
        Deck {
            name: id.clone(),
            id,
            class_index,
            cards: CardMultiset::new(),
            wins: 0,
            losses: 0,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_cards(mut self, cards: CardMultiset) -> Self {
        self.cards = cards;
        self
    }

    pub fn with_record(mut self, wins: u32, losses: u32) -> Self {
        self.wins = wins;
        self.losses = losses;
        self
    }

    pub fn card_count(&self) -> usize {
        self.cards.total()
    }

    pub fn is_arena(&self) -> bool {
        self.id == ARENA_DECK_ID
    }

    /// Drops every known card and reassigns the class.
    pub fn reset(&mut self, class_index: i32) {
        self.cards.clear();
        self.class_index = class_index;
    }

    pub fn record_result(&mut self, victory: bool) {
        if victory {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
    }
}

/// Which side of the board acted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn label(&self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

/// A card played during the match. `turn` is the raw game turn, which counts
/// both players' turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardPlay {
    pub turn: u32,
    pub side: Side,
    pub card_id: String,
}

impl CardPlay {
    pub fn new(turn: u32, side: Side, card_id: impl Into<String>) -> Self {
        CardPlay {
            turn,
            side,
            card_id: card_id.into(),
        }
    }

    /// Per-player turn number: raw turns 1,2,3,4 become 1,1,2,2.
    pub fn display_turn(&self) -> u32 {
        self.turn.div_ceil(2)
    }
}

/// Hero label for a class index.
pub fn hero_name(class_index: i32) -> &'static str {
    match class_index {
        0 => "warrior",
        1 => "shaman",
        2 => "rogue",
        3 => "paladin",
        4 => "hunter",
        5 => "druid",
        6 => "warlock",
        7 => "mage",
        8 => "priest",
        9 => "demonhunter",
        _ => "unknown",
    }
}
