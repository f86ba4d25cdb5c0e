//! # sweep-engine
//!
//! Rules engine for Sweep, a two-player Cassino-family fishing card game,
//! built to be driven by external choosers (human loops, random rollouts,
//! learned policies).
//!
//! ## Design Principles
//!
//! 1. **Complete legality sets**: `legal_actions` enumerates every distinct
//!    capture, pile build, and discard; the combinatorial search returns
//!    all maximal exact-sum groupings rather than one greedy answer.
//!
//! 2. **Atomic transitions**: `apply` either executes a move completely or
//!    panics before any mutation; invariants (pile sums, non-empty capture
//!    lists) are enforced at construction time.
//!
//! 3. **One source of truth**: pile data lives in a single arena; the
//!    table order and the value index hold ids, so they can never disagree.
//!
//! 4. **Deterministic and forkable**: seeded ChaCha RNG, O(1)-clone action
//!    history, and `bincode` snapshots for self-play checkpointing.
//!
//! ## Modules
//!
//! - `cards`: ranks, suits, cards, the 52-card deck
//! - `core`: players, actions, game state, RNG
//! - `table`: loose cards, piles, the pile arena and value index
//! - `search`: maximal disjoint exact-sum combination search
//! - `rules`: legal-action generation and action execution
//! - `round`: dealing, phase lifecycle, scoring, carry-over
//! - `chooser`: policies selecting from the legal-action list

pub mod cards;
pub mod chooser;
pub mod core;
pub mod round;
pub mod rules;
pub mod search;
pub mod table;

// Re-export commonly used types
pub use crate::cards::{Card, Deck, Rank, Suit};

pub use crate::core::{
    Action, ActionKind, ActionRecord, GameRng, GameRngState, GameState, PlayerId, PlayerPair,
    PlayerState,
};

pub use crate::table::{CreatorSet, Pile, PileId, Table, TableEntry, TableItemRef};

pub use crate::search::{capture_groups, CaptureGroup};

pub use crate::rules::{apply, legal_actions};

pub use crate::round::{
    next_opening, run_round, Round, RoundOutcome, RoundPhase, MAJORITY_THRESHOLD, SWEEP_BONUS,
};

pub use crate::chooser::{Chooser, GreedyChooser, RandomChooser};
