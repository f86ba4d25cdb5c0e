//! The 52-card round deck.

use serde::{Deserialize, Serialize};

use super::card::{Card, Rank, Suit};
use crate::core::rng::GameRng;

/// A deck of cards, dealt from the front.
///
/// A fresh deck holds each of the 52 cards exactly once. Cards are never
/// duplicated or destroyed: they flow deck -> hand -> table/pile -> captured
/// over a round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Create the standard 52-card deck in suit-then-rank order.
    #[must_use]
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    /// Number of undealt cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True if no cards remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Remaining cards, front first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle the remaining cards in place.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        rng.shuffle(&mut self.cards);
    }

    /// Deal `n` cards from the front.
    ///
    /// The deck must hold at least `n` cards; dealing is driven by the fixed
    /// round structure, never speculatively.
    pub fn deal(&mut self, n: usize) -> Vec<Card> {
        assert!(n <= self.cards.len(), "dealt past the end of the deck");
        self.cards.drain(..n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_standard_deck_has_52_unique_cards() {
        let deck = Deck::standard();
        assert_eq!(deck.len(), 52);

        let unique: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(unique.len(), 52);
    }

    #[test]
    fn test_shuffle_preserves_cards() {
        let mut rng = GameRng::new(42);
        let mut deck = Deck::standard();
        let before: HashSet<Card> = deck.cards().iter().copied().collect();

        deck.shuffle(&mut rng);

        let after: HashSet<Card> = deck.cards().iter().copied().collect();
        assert_eq!(before, after);
        assert_ne!(deck, Deck::standard());
    }

    #[test]
    fn test_deal_from_front() {
        let mut deck = Deck::standard();
        let first_four: Vec<Card> = deck.cards()[..4].to_vec();

        let dealt = deck.deal(4);

        assert_eq!(dealt, first_four);
        assert_eq!(deck.len(), 48);
    }

    #[test]
    #[should_panic(expected = "dealt past the end")]
    fn test_deal_too_many_panics() {
        let mut deck = Deck::standard();
        deck.deal(53);
    }

    #[test]
    fn test_total_deck_points() {
        // 13 spades summing 91, 3 non-spade aces, ten of diamonds.
        let total: i64 = Deck::standard().cards().iter().map(|c| c.points()).sum();
        assert_eq!(total, 91 + 3 + 2);
    }
}
