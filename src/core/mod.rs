//! Core engine types: players, actions, state, RNG.

pub mod action;
pub mod player;
pub mod rng;
pub mod state;

pub use action::{Action, ActionKind, ActionRecord};
pub use player::{PlayerId, PlayerPair, PlayerState};
pub use rng::{GameRng, GameRngState};
pub use state::GameState;
