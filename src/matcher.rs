use crate::cards::{CardMultiset, Deck, MAX_CARDS};

/// How well a deck explains an observed set of cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Score {
    /// Wrong class, or the observation cannot fit in a full deck.
    Invalid,
    /// Number of observed cards the deck accounts for.
    Matched(u32),
}

impl Score {
    pub fn is_matched(&self) -> bool {
        matches!(self, Score::Matched(_))
    }

    pub fn matched(&self) -> Option<u32> {
        match self {
            Score::Matched(count) => Some(*count),
            Score::Invalid => None,
        }
    }
}

/// Scores `deck` against `observed` using the standard deck size.
pub fn score(deck: &Deck, class_index: i32, observed: &CardMultiset) -> Score {
    score_with_cap(deck, class_index, observed, MAX_CARDS)
}

/// Counts the observed cards the deck can explain. Cards the deck does not
/// know about are assumed to be unlisted deck cards; if those plus the
/// deck's remaining cards exceed `cap`, the deck cannot be the one in play.
pub fn score_with_cap(
    deck: &Deck,
    class_index: i32,
    observed: &CardMultiset,
    cap: usize,
) -> Score {
    if deck.class_index != class_index {
        return Score::Invalid;
    }

    let mut remaining = deck.cards.clone();
    let mut matched_cards: u32 = 0;
    let mut new_cards: u32 = 0;

    for (card_id, in_observed) in observed.iter() {
        let matched = remaining.remove(card_id, in_observed);
        new_cards += in_observed - matched;
        matched_cards += matched;
    }

    let total = remaining.total() + matched_cards as usize + new_cards as usize;
    if total > cap {
        Score::Invalid
    } else {
        Score::Matched(matched_cards)
    }
}
