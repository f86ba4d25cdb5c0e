//! Player identification and per-player round state.
//!
//! Sweep is strictly a two-player game. `PlayerId` is a type-safe index
//! (0 or 1) and `PlayerPair` stores one value per player with O(1) access
//! and indexing by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use crate::cards::Card;

/// Player identifier for the two seats.
///
/// Player indices are 0-based: the first seat is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID. Must be 0 or 1.
    #[must_use]
    pub fn new(id: u8) -> Self {
        assert!(id < 2, "Sweep has exactly two players");
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        Self(1 - self.0)
    }

    /// Both player IDs in seat order.
    #[must_use]
    pub const fn both() -> [PlayerId; 2] {
        [PlayerId(0), PlayerId(1)]
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per player, indexed by `PlayerId`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPair<T> {
    data: [T; 2],
}

impl<T> PlayerPair<T> {
    /// Create a pair from values for seat 0 and seat 1.
    #[must_use]
    pub fn new(first: T, second: T) -> Self {
        Self {
            data: [first, second],
        }
    }

    /// Create a pair from a factory receiving each `PlayerId`.
    pub fn from_fn(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            data: [factory(PlayerId(0)), factory(PlayerId(1))],
        }
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over (PlayerId, &mut T) pairs.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerPair<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerPair<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

/// Per-player round state.
///
/// `hand` is kept sorted by card value after every deal. `captured` is the
/// unordered bag of won cards; `points` and `sweeps` accumulate over the
/// round and are read by the scoring step and any external reward function.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Display name.
    pub name: String,

    /// Cards in hand, sorted by value after each deal.
    pub hand: Vec<Card>,

    /// Cards won so far this round.
    pub captured: Vec<Card>,

    /// Points accumulated this round.
    pub points: i64,

    /// Times this player cleared the table.
    pub sweeps: u32,
}

impl PlayerState {
    /// Create an empty player state.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hand: Vec::new(),
            captured: Vec::new(),
            points: 0,
            sweeps: 0,
        }
    }

    /// Add dealt cards and re-sort the hand by value.
    pub fn take_deal(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.hand.extend(cards);
        self.hand.sort_by_key(|c| c.value());
    }

    /// Remove a specific card from the hand.
    ///
    /// The card must be present; playing a card not in hand is a logic fault.
    pub fn remove_from_hand(&mut self, card: Card) {
        let pos = self
            .hand
            .iter()
            .position(|&c| c == card)
            .unwrap_or_else(|| panic!("{card} is not in {}'s hand", self.name));
        self.hand.remove(pos);
    }

    /// True if the hand holds a card of `value` other than `except`.
    #[must_use]
    pub fn holds_other_of_value(&self, value: u8, except: Card) -> bool {
        self.hand
            .iter()
            .any(|&c| c != except && c.value() == value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};

    #[test]
    fn test_player_id_basics() {
        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);

        assert_eq!(p0.opponent(), p1);
        assert_eq!(p1.opponent(), p0);
        assert_eq!(format!("{p0}"), "Player 0");
    }

    #[test]
    #[should_panic(expected = "exactly two players")]
    fn test_player_id_out_of_range() {
        let _ = PlayerId::new(2);
    }

    #[test]
    fn test_player_pair_indexing() {
        let mut pair = PlayerPair::new(10, 20);

        assert_eq!(pair[PlayerId::new(0)], 10);
        pair[PlayerId::new(1)] = 30;
        assert_eq!(pair[PlayerId::new(1)], 30);
    }

    #[test]
    fn test_player_pair_iter() {
        let pair = PlayerPair::from_fn(|p| p.index() as i32 * 10);
        let items: Vec<_> = pair.iter().collect();

        assert_eq!(items, vec![(PlayerId::new(0), &0), (PlayerId::new(1), &10)]);
    }

    #[test]
    fn test_take_deal_sorts_hand() {
        let mut player = PlayerState::new("P0");
        player.take_deal([
            Card::new(Rank::King, Suit::Hearts),
            Card::new(Rank::Two, Suit::Spades),
            Card::new(Rank::Nine, Suit::Clubs),
        ]);

        let values: Vec<u8> = player.hand.iter().map(|c| c.value()).collect();
        assert_eq!(values, vec![2, 9, 13]);
    }

    #[test]
    fn test_remove_from_hand() {
        let mut player = PlayerState::new("P0");
        let nine = Card::new(Rank::Nine, Suit::Clubs);
        player.take_deal([nine, Card::new(Rank::Two, Suit::Spades)]);

        player.remove_from_hand(nine);

        assert_eq!(player.hand, vec![Card::new(Rank::Two, Suit::Spades)]);
    }

    #[test]
    #[should_panic(expected = "not in P0's hand")]
    fn test_remove_missing_card_panics() {
        let mut player = PlayerState::new("P0");
        player.remove_from_hand(Card::new(Rank::Ace, Suit::Spades));
    }

    #[test]
    fn test_holds_other_of_value() {
        let mut player = PlayerState::new("P0");
        let nine_clubs = Card::new(Rank::Nine, Suit::Clubs);
        let nine_hearts = Card::new(Rank::Nine, Suit::Hearts);
        player.take_deal([nine_clubs, nine_hearts]);

        assert!(player.holds_other_of_value(9, nine_clubs));

        player.remove_from_hand(nine_hearts);
        assert!(!player.holds_other_of_value(9, nine_clubs));
    }
}
