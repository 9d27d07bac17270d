use crate::cards::{CardMultiset, Deck};
use crate::classifier::GameplayMode;
use crate::config::TrackerConfig;
use crate::error::RepositoryError;
use crate::matcher::score_with_cap;
use crate::repository::DeckRepository;

/// Why a deck was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionReason {
    /// Automatic selection is disabled.
    Disabled,
    Arena,
    /// The active deck still fits the opening hand.
    Kept,
    /// Highest scoring deck of the class.
    BestMatch(u32),
    /// Nothing fit; a fresh deck was allocated.
    Created,
    /// The repository could not be read; the active deck stays in play
    /// without being checked against the hand.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub deck: Deck,
    pub reason: SelectionReason,
}

/// Chooses the deck in play at match start.
pub struct DeckSelector<'a, R: ?Sized> {
    repo: &'a R,
    auto_select: bool,
    max_cards: usize,
}

impl<'a, R: DeckRepository + ?Sized> DeckSelector<'a, R> {
    pub fn new(repo: &'a R, config: &TrackerConfig) -> Self {
        DeckSelector {
            repo,
            auto_select: config.auto_select_deck,
            max_cards: config.max_deck_cards,
        }
    }

    pub fn select(
        &self,
        active: &Deck,
        class_index: i32,
        gameplay: GameplayMode,
        observed: &CardMultiset,
    ) -> Result<Selection, RepositoryError> {
        if !self.auto_select {
            return Ok(Selection {
                deck: active.clone(),
                reason: SelectionReason::Disabled,
            });
        }

        if gameplay == GameplayMode::Draft {
            tracing::info!("using arena deck");
            return Ok(Selection {
                deck: self.repo.arena_deck()?,
                reason: SelectionReason::Arena,
            });
        }

        if score_with_cap(active, class_index, observed, self.max_cards).is_matched() {
            return Ok(Selection {
                deck: active.clone(),
                reason: SelectionReason::Kept,
            });
        }

        // Largest decks first: with a strict `>` below, ties go to the
        // bigger deck.
        let mut candidates = self.repo.list_decks(Some(class_index))?;
        candidates.sort_by(|a, b| b.card_count().cmp(&a.card_count()));

        let mut best: Option<(u32, Deck)> = None;
        for candidate in candidates {
            let score = score_with_cap(&candidate, class_index, observed, self.max_cards);
            tracing::debug!(deck = %candidate.name, ?score, "deck selection");

            if let Some(matched) = score.matched() {
                if best.as_ref().map_or(true, |(max, _)| matched > *max) {
                    best = Some((matched, candidate));
                }
            }
        }

        match best {
            Some((matched, deck)) => Ok(Selection {
                deck,
                reason: SelectionReason::BestMatch(matched),
            }),
            None => Ok(Selection {
                deck: self.repo.create_deck(class_index)?,
                reason: SelectionReason::Created,
            }),
        }
    }
}
