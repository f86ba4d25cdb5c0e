//! Rules: the legal-action generator and the action execution engine.
//!
//! `legal_actions` is a read-only query producing the complete ordered
//! legal-action set for the player to move. `apply` is the single owner of
//! table, pile, hand, and score mutation: it executes one generator-produced
//! action atomically and advances the turn.

pub mod execute;
pub mod generator;

pub use execute::apply;
pub use generator::legal_actions;
