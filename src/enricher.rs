use crate::cards::{CardMultiset, Deck};

/// A card count raised by [`enrich`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRaise {
    pub card_id: String,
    pub from: u32,
    pub to: u32,
}

/// Raises the deck's card counts to what was revealed during the match.
///
/// Counts only ever go up, and the deck total never exceeds `cap`: a raise
/// that would overflow is clamped to the room left. Running it again with
/// the same snapshot changes nothing.
pub fn enrich(deck: &mut Deck, revealed: &CardMultiset, cap: usize) -> Vec<CardRaise> {
    let mut raises = Vec::new();

    for (card_id, found) in revealed.iter() {
        let total = deck.cards.total();
        if total >= cap {
            break;
        }

        let known = deck.cards.get(card_id);
        if found <= known {
            continue;
        }

        let room = u32::try_from(cap - total).unwrap_or(u32::MAX);
        let to = found.min(known.saturating_add(room));
        tracing::info!(deck = %deck.id, card = card_id, from = known, to, "adding card to the deck");
        deck.cards.set(card_id, to);
        raises.push(CardRaise {
            card_id: card_id.to_string(),
            from: known,
            to,
        });
    }

    raises
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::MAX_CARDS;

    fn cards(entries: &[(&str, u32)]) -> CardMultiset {
        entries.iter().copied().collect()
    }

    #[test]
    fn raises_counts_to_revealed() {
        let mut deck = Deck::new("d", 1).with_cards(cards(&[("X", 1), ("Y", 2)]));
        let raises = enrich(&mut deck, &cards(&[("X", 2), ("Y", 1), ("Z", 1)]), MAX_CARDS);

        assert_eq!(deck.cards, cards(&[("X", 2), ("Y", 2), ("Z", 1)]));
        assert_eq!(raises.len(), 2);
        assert_eq!(
            raises[0],
            CardRaise {
                card_id: "X".into(),
                from: 1,
                to: 2
            }
        );
    }

    #[test]
    fn second_run_is_a_no_op() {
        let mut deck = Deck::new("d", 1).with_cards(cards(&[("X", 1)]));
        let revealed = cards(&[("X", 2), ("Y", 2)]);

        enrich(&mut deck, &revealed, MAX_CARDS);
        let once = deck.clone();
        let raises = enrich(&mut deck, &revealed, MAX_CARDS);

        assert!(raises.is_empty());
        assert_eq!(deck, once);
    }

    #[test]
    fn never_exceeds_cap() {
        let mut deck = Deck::new("d", 1).with_cards(cards(&[("W", 28)]));
        let revealed = cards(&[("A", 2), ("B", 2)]);

        enrich(&mut deck, &revealed, MAX_CARDS);
        assert_eq!(deck.card_count(), MAX_CARDS);
        assert_eq!(deck.cards.get("A"), 2);
        assert_eq!(deck.cards.get("B"), 0);

        let capped = deck.clone();
        enrich(&mut deck, &revealed, MAX_CARDS);
        assert_eq!(deck, capped);
    }

    #[test]
    fn partial_raise_when_room_is_short() {
        let mut deck = Deck::new("d", 1).with_cards(cards(&[("W", 29)]));
        enrich(&mut deck, &cards(&[("A", 2)]), MAX_CARDS);
        assert_eq!(deck.cards.get("A"), 1);
        assert_eq!(deck.card_count(), MAX_CARDS);
    }

    #[test]
    fn full_deck_is_untouched() {
        let mut deck = Deck::new("d", 1).with_cards(cards(&[("W", 30)]));
        assert!(enrich(&mut deck, &cards(&[("A", 1)]), MAX_CARDS).is_empty());
    }
}
