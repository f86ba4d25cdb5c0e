//! Piles: player-built stacks capturable only by their declared value.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::player::PlayerId;

/// Stable identifier for a pile in the table arena.
///
/// Ids are allocated by the table and never reused within a round, so an
/// action can reference a pile without holding a duplicate of its cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PileId(pub u32);

/// The set of players who have contributed a piling move to a pile.
///
/// Two seats, so a two-bit set. Creator membership drives both combination
/// eligibility and the throw lock-out rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CreatorSet(u8);

impl CreatorSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// A set containing a single player.
    #[must_use]
    pub const fn single(player: PlayerId) -> Self {
        Self(1 << player.0)
    }

    /// Add a player.
    pub fn insert(&mut self, player: PlayerId) {
        self.0 |= 1 << player.0;
    }

    /// Membership test.
    #[must_use]
    pub const fn contains(self, player: PlayerId) -> bool {
        self.0 & (1 << player.0) != 0
    }
}

/// A capturable stack anchored at a declared value (9..=13).
///
/// Invariant: the cards sum to an exact multiple of `value`. Construction
/// checks this before the pile can reach the table, so the table never holds
/// a malformed pile. `doubled` is true once that multiple is at least 2.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pile {
    id: PileId,
    value: u8,
    cards: SmallVec<[Card; 8]>,
    creators: CreatorSet,
    doubled: bool,
}

impl Pile {
    /// Build a pile, checking the sum invariant.
    ///
    /// Panics if `value` is outside 9..=13 or the cards do not sum to an
    /// exact multiple of `value`.
    #[must_use]
    pub fn new(
        id: PileId,
        creators: CreatorSet,
        cards: impl IntoIterator<Item = Card>,
        value: u8,
    ) -> Self {
        assert!(
            (9..=13).contains(&value),
            "pile value {value} outside 9..=13"
        );

        let cards: SmallVec<[Card; 8]> = cards.into_iter().collect();
        let sum: u32 = cards.iter().map(|c| c.value() as u32).sum();
        assert!(
            sum > 0 && sum % value as u32 == 0,
            "pile cards sum to {sum}, not a multiple of {value}"
        );

        Self {
            id,
            value,
            cards,
            creators,
            doubled: sum / value as u32 >= 2,
        }
    }

    /// Stable arena id.
    #[must_use]
    pub const fn id(&self) -> PileId {
        self.id
    }

    /// Declared capture value.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.value
    }

    /// Cards in the pile, oldest first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Players who have piled onto this stack.
    #[must_use]
    pub const fn creators(&self) -> CreatorSet {
        self.creators
    }

    /// True once the card sum is at least twice the declared value.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Consume the pile, yielding its cards.
    #[must_use]
    pub fn into_cards(self) -> SmallVec<[Card; 8]> {
        self.cards
    }
}

impl std::fmt::Display for Pile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pile of {}: [", self.value)?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        write!(f, "]")
    }
}
