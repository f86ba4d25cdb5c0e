//! Card system: ranks, suits, cards, and the deck.
//!
//! ## Key Types
//!
//! - `Rank` / `Suit`: the 13 ranks and 4 suits of a standard deck
//! - `Card`: immutable identity value (equality/hash by rank + suit)
//! - `Deck`: the 52-card round deck with shuffle and deal operations
//!
//! Card values (A=1 .. K=13) and scoring points are pure functions of
//! rank and suit, so they are derived rather than stored.

pub mod card;
pub mod deck;

pub use card::{Card, Rank, Suit};
pub use deck::Deck;
