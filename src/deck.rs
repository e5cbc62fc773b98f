//! The draw pile.
//!
//! Order convention: the END of the vector is the draw end ("top"),
//! index 0 is the bottom. `draw` pops from the tail; Chancellor
//! leftovers are re-inserted at index 0.

use serde::{Deserialize, Serialize};

use crate::core::{Card, CardId, CardKind, GameRng, DECK_SIZE};

/// The face-down draw pile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Build the 21-card deck and shuffle it uniformly.
    ///
    /// Card ids are assigned sequentially before the shuffle, so the ids
    /// in play for a round are always exactly `0..21`.
    #[must_use]
    pub fn standard(rng: &mut GameRng) -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        let mut next_id = 0u32;
        for kind in CardKind::ALL {
            for _ in 0..kind.copies() {
                cards.push(Card::new(CardId::new(next_id), kind));
                next_id += 1;
            }
        }
        rng.shuffle(&mut cards);
        Self { cards }
    }

    /// Build a pile holding exactly these cards, bottom first.
    ///
    /// Used by tests and snapshot restoration; normal play goes through
    /// [`Deck::standard`].
    #[must_use]
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards }
    }

    /// Remove and return the card at the draw end.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Remove and return a uniformly-random card.
    ///
    /// Used once per round to set the hidden card aside.
    pub fn draw_random(&mut self, rng: &mut GameRng) -> Option<Card> {
        if self.cards.is_empty() {
            return None;
        }
        let index = rng.gen_range_usize(0..self.cards.len());
        Some(self.cards.remove(index))
    }

    /// Insert a card at the bottom (draw-far end).
    pub fn return_to_bottom(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    /// Cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// No cards remaining.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Read-only view, bottom first.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn card(id: u32, kind: CardKind) -> Card {
        Card::new(CardId::new(id), kind)
    }

    #[test]
    fn test_standard_composition() {
        let mut rng = GameRng::new(7);
        let deck = Deck::standard(&mut rng);

        assert_eq!(deck.len(), DECK_SIZE);
        for kind in CardKind::ALL {
            let count = deck.iter().filter(|c| c.kind == kind).count();
            assert_eq!(count, kind.copies() as usize, "copies of {}", kind);
        }

        let ids: HashSet<u32> = deck.iter().map(|c| c.id.raw()).collect();
        assert_eq!(ids.len(), DECK_SIZE);
    }

    #[test]
    fn test_shuffle_is_seed_deterministic() {
        let mut rng1 = GameRng::new(99);
        let mut rng2 = GameRng::new(99);
        let deck1 = Deck::standard(&mut rng1);
        let deck2 = Deck::standard(&mut rng2);
        assert_eq!(deck1, deck2);

        let mut rng3 = GameRng::new(100);
        let deck3 = Deck::standard(&mut rng3);
        assert_ne!(deck1, deck3);
    }

    #[test]
    fn test_draw_comes_from_tail() {
        let mut deck = Deck::from_cards(vec![
            card(0, CardKind::Guard),
            card(1, CardKind::Baron),
            card(2, CardKind::King),
        ]);

        assert_eq!(deck.draw(), Some(card(2, CardKind::King)));
        assert_eq!(deck.draw(), Some(card(1, CardKind::Baron)));
        assert_eq!(deck.draw(), Some(card(0, CardKind::Guard)));
        assert_eq!(deck.draw(), None);
        assert!(deck.is_empty());
    }

    #[test]
    fn test_return_to_bottom_draws_last() {
        let mut deck = Deck::from_cards(vec![card(0, CardKind::Guard)]);
        deck.return_to_bottom(card(1, CardKind::Princess));

        assert_eq!(deck.len(), 2);
        assert_eq!(deck.draw(), Some(card(0, CardKind::Guard)));
        assert_eq!(deck.draw(), Some(card(1, CardKind::Princess)));
    }

    #[test]
    fn test_draw_random_removes_one() {
        let mut rng = GameRng::new(3);
        let mut deck = Deck::standard(&mut rng);

        let drawn = deck.draw_random(&mut rng).unwrap();
        assert_eq!(deck.len(), DECK_SIZE - 1);
        assert!(deck.iter().all(|c| c.id != drawn.id));

        let mut empty = Deck::from_cards(Vec::new());
        assert_eq!(empty.draw_random(&mut rng), None);
    }
}
