//! Complete game state for one round of play.
//!
//! The state is a plain aggregate: two players, the shared table, the
//! undealt deck, whose turn it is, and who last picked up. Mutation is owned
//! by action execution and the round driver; everything else reads.
//!
//! The action history uses an `im::Vector` so cloning a state for a
//! self-play branch stays cheap no matter how long the round has run.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::ActionRecord;
use super::player::{PlayerId, PlayerPair, PlayerState};
use super::rng::GameRng;
use crate::cards::Deck;
use crate::table::Table;

/// Full state of a round in progress.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    /// Both players' round state.
    pub players: PlayerPair<PlayerState>,

    /// The shared table.
    pub table: Table,

    /// Undealt cards.
    pub deck: Deck,

    /// Whose turn it is.
    pub turn: PlayerId,

    /// The player who last captured, if anyone has.
    pub last_to_pick_up: Option<PlayerId>,

    /// Every move taken this round, in order.
    pub history: Vector<ActionRecord>,

    /// Deterministic RNG for dealing.
    pub rng: GameRng,
}

impl GameState {
    /// Create a fresh round state with a full shuffled-later deck.
    #[must_use]
    pub fn new(opening: PlayerId, rng: GameRng) -> Self {
        Self {
            players: PlayerPair::from_fn(|p| PlayerState::new(format!("Player {}", p.0))),
            table: Table::new(),
            deck: Deck::standard(),
            turn: opening,
            last_to_pick_up: None,
            history: Vector::new(),
            rng,
        }
    }

    /// The player to move.
    #[must_use]
    pub fn mover(&self) -> &PlayerState {
        &self.players[self.turn]
    }

    /// True while either player still holds cards or the deck has more.
    #[must_use]
    pub fn cards_remain(&self) -> bool {
        !self.deck.is_empty() || self.players.iter().any(|(_, p)| !p.hand.is_empty())
    }

    /// Total cards across deck, hands, table, and captured bags.
    ///
    /// Always 52 from the opening deal onward; checked by tests after every
    /// execution.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len()
            + self.table.card_count()
            + self
                .players
                .iter()
                .map(|(_, p)| p.hand.len() + p.captured.len())
                .sum::<usize>()
    }

    /// Record a move in the history.
    pub fn record(&mut self, record: ActionRecord) {
        self.history.push_back(record);
    }

    /// Clone the state for a self-play branch.
    ///
    /// Takes `&mut self` because forking the RNG advances its fork counter.
    #[must_use]
    pub fn clone_state(&mut self) -> Self {
        Self {
            players: self.players.clone(),
            table: self.table.clone(),
            deck: self.deck.clone(),
            turn: self.turn,
            last_to_pick_up: self.last_to_pick_up,
            history: self.history.clone(),
            rng: self.rng.fork(),
        }
    }
}
