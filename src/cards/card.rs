//! Cards as immutable identity values.
//!
//! A `Card` is rank + suit. Its capture value (A=1 .. K=13) and its scoring
//! weight are derived:
//! - every spade scores its capture value
//! - every ace scores 1
//! - the ten of diamonds scores 2
//! - everything else scores 0

use serde::{Deserialize, Serialize};

/// The four suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    /// All suits in display order.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    /// Unicode symbol for display.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

/// The thirteen ranks, ace low.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    /// All ranks in value order.
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Capture value: A=1 .. K=13.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8 + 1
    }

    /// Short display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// A playing card.
///
/// Cards are identity values: equality and hashing use rank + suit, and a
/// round deck contains each card exactly once.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    /// Create a card.
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Capture value (A=1 .. K=13).
    #[must_use]
    pub const fn value(self) -> u8 {
        self.rank.value()
    }

    /// Scoring weight of this card.
    ///
    /// Spades score their capture value, aces score 1, the ten of diamonds
    /// scores 2, all other cards score 0.
    #[must_use]
    pub const fn points(self) -> i64 {
        match (self.rank, self.suit) {
            (_, Suit::Spades) => self.rank.value() as i64,
            (Rank::Ace, _) => 1,
            (Rank::Ten, Suit::Diamonds) => 2,
            _ => 0,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.label(), self.suit.symbol())
    }
}
