//! Choosers: policies that pick one action from the legal list.
//!
//! The engine hands a chooser the ordered legal-action list and the current
//! state; the chooser returns an index into that list. Human input loops,
//! random rollouts, and learned policies all sit behind this trait.

use crate::core::action::{Action, ActionKind};
use crate::core::rng::GameRng;
use crate::core::state::GameState;

/// A policy choosing one action from a non-empty legal list.
///
/// Implementations must return an index into `actions`; fabricating moves
/// outside the offered list is not possible through this interface.
pub trait Chooser {
    fn choose(&mut self, state: &GameState, actions: &[Action]) -> usize;
}

/// Uniform random policy over the legal list.
#[derive(Clone, Debug)]
pub struct RandomChooser {
    rng: GameRng,
}

impl RandomChooser {
    /// Create a random chooser with its own seeded stream.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl Chooser for RandomChooser {
    fn choose(&mut self, _state: &GameState, actions: &[Action]) -> usize {
        assert!(!actions.is_empty(), "cannot choose from an empty list");
        self.rng.gen_range_usize(0..actions.len())
    }
}

/// Greedy policy: the capture worth the most immediate points, then any
/// capture, then any pile-on, then the first throw.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyChooser;

impl Chooser for GreedyChooser {
    fn choose(&mut self, state: &GameState, actions: &[Action]) -> usize {
        assert!(!actions.is_empty(), "cannot choose from an empty list");

        let capture_points = |action: &Action| -> i64 {
            action.card.points()
                + action
                    .items
                    .iter()
                    .map(|&item| match item {
                        crate::table::TableItemRef::Card(c) => c.points(),
                        crate::table::TableItemRef::Pile(id) => state
                            .table
                            .pile(id)
                            .cards()
                            .iter()
                            .map(|c| c.points())
                            .sum(),
                    })
                    .sum::<i64>()
        };

        actions
            .iter()
            .enumerate()
            .max_by_key(|(i, a)| {
                let rank = match a.kind {
                    ActionKind::PickUp => 2,
                    ActionKind::PileOn => 1,
                    ActionKind::Throw => 0,
                };
                // Earlier index wins ties for determinism.
                (rank, capture_points(a), std::cmp::Reverse(*i))
            })
            .map(|(i, _)| i)
            .expect("non-empty list")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::core::player::PlayerId;
    use crate::table::TableItemRef;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn empty_state() -> GameState {
        let mut state = GameState::new(PlayerId::new(0), GameRng::new(42));
        state.deck.deal(52);
        state
    }

    #[test]
    fn test_random_chooser_stays_in_bounds() {
        let state = empty_state();
        let actions = vec![
            Action::throw(card(Rank::Two, Suit::Hearts)),
            Action::throw(card(Rank::Three, Suit::Hearts)),
            Action::throw(card(Rank::Four, Suit::Hearts)),
        ];

        let mut chooser = RandomChooser::new(GameRng::new(42));
        for _ in 0..50 {
            assert!(chooser.choose(&state, &actions) < actions.len());
        }
    }

    #[test]
    fn test_greedy_prefers_richest_capture() {
        let mut state = empty_state();
        let nine_s = card(Rank::Nine, Suit::Spades);
        let nine_h = card(Rank::Nine, Suit::Hearts);
        state.table.push_card(nine_s);
        state.table.push_card(nine_h);

        let played = card(Rank::Nine, Suit::Clubs);
        let actions = vec![
            Action::throw(card(Rank::Two, Suit::Hearts)),
            Action::pick_up(played, [TableItemRef::Card(nine_h)]),
            Action::pick_up(played, [TableItemRef::Card(nine_s)]),
        ];

        let mut chooser = GreedyChooser;
        // 9♠ is worth 9 points; the 9♥ capture is worth 0.
        assert_eq!(chooser.choose(&state, &actions), 2);
    }

    #[test]
    fn test_greedy_falls_back_to_throw() {
        let state = empty_state();
        let actions = vec![Action::throw(card(Rank::Two, Suit::Hearts))];

        let mut chooser = GreedyChooser;
        assert_eq!(chooser.choose(&state, &actions), 0);
    }
}
