//! Round lifecycle: dealing, the forced opening, phase transitions, scoring.
//!
//! A round runs `Dealt -> FirstHalfPlay -> SecondHalfDeal -> SecondHalfPlay
//! -> Scored`. The driver owns dealing and phase bookkeeping; move legality
//! and execution live in `rules`. Round-to-round carry-over is an explicit
//! value: `score` takes the running differential in and `RoundOutcome`
//! hands the updated one back, and `next_opening` turns it into the next
//! round's first mover.

use serde::{Deserialize, Serialize};

use crate::chooser::Chooser;
use crate::core::action::Action;
use crate::core::player::{PlayerId, PlayerPair};
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::rules::{apply, legal_actions};

/// Points awarded per sweep at round end.
pub const SWEEP_BONUS: i64 = 50;

/// Cards needed for the capture-majority bonus (a strict majority of 52).
pub const MAJORITY_THRESHOLD: usize = 26;

/// Lifecycle states of one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    Dealt,
    FirstHalfPlay,
    SecondHalfDeal,
    SecondHalfPlay,
    Scored,
}

/// Final accounting for a round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// Each player's round total: points plus sweep bonuses.
    pub totals: PlayerPair<i64>,

    /// Updated running differential (player 0 minus player 1).
    pub differential: i64,
}

/// Who opens the next round, given the updated differential.
///
/// The trailing player opens: negative differential means player 0 is
/// behind and opens, positive means player 1 opens, tied leaves the opener
/// unchanged.
#[must_use]
pub fn next_opening(differential: i64, current: PlayerId) -> PlayerId {
    match differential.cmp(&0) {
        std::cmp::Ordering::Less => PlayerId::new(0),
        std::cmp::Ordering::Greater => PlayerId::new(1),
        std::cmp::Ordering::Equal => current,
    }
}

/// Driver for one round of play.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Round {
    state: GameState,
    phase: RoundPhase,
    forced_value: Option<u8>,
}

impl Round {
    /// Deal the opening: four cards to the first mover (reshuffling until
    /// that hand holds a 9..=13), four to the table, four to the opponent.
    ///
    /// The first mover's declaration is forced to their maximum card value;
    /// the first legal-action list is restricted to that value.
    #[must_use]
    pub fn deal(opening: PlayerId, rng: GameRng) -> Self {
        let mut state = GameState::new(opening, rng);

        loop {
            state.deck.shuffle(&mut state.rng);
            if state.deck.cards()[..4].iter().any(|c| c.value() >= 9) {
                break;
            }
        }

        let first_hand = state.deck.deal(4);
        let declared = first_hand
            .iter()
            .map(|c| c.value())
            .max()
            .expect("opening hand has four cards");
        state.players[opening].take_deal(first_hand);

        for card in state.deck.deal(4) {
            state.table.push_card(card);
        }
        state.players[opening.opponent()].take_deal(state.deck.deal(4));

        Self {
            state,
            phase: RoundPhase::Dealt,
            forced_value: Some(declared),
        }
    }

    /// Current state, read-only.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// The forced opening declaration, while it is still in force.
    #[must_use]
    pub fn forced_value(&self) -> Option<u8> {
        self.forced_value
    }

    /// The ordered legal-action list for the player to move.
    ///
    /// While the forced opening declaration is in force, only actions at
    /// the declared value are offered.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        let mut actions = legal_actions(&self.state);
        if let Some(declared) = self.forced_value {
            actions.retain(|a| a.value == declared);
            assert!(
                !actions.is_empty(),
                "forced declaration {declared} left no legal actions",
            );
        }
        actions
    }

    /// Play one action from the current legal list.
    ///
    /// Panics if `action` is not in the list `legal_actions` currently
    /// returns: execution must never see a fabricated move.
    pub fn play(&mut self, action: &Action) {
        assert!(
            matches!(
                self.phase,
                RoundPhase::Dealt | RoundPhase::FirstHalfPlay | RoundPhase::SecondHalfPlay
            ),
            "cannot play during {:?}",
            self.phase,
        );
        assert!(
            self.legal_actions().contains(action),
            "submitted action is not in the current legal list: {action}",
        );

        apply(&mut self.state, action);
        self.advance_phase();
    }

    /// Play by index into the current legal-action list.
    ///
    /// This is the chooser contract: choosers return an index into the list
    /// they were handed.
    pub fn play_indexed(&mut self, index: usize) {
        let actions = self.legal_actions();
        assert!(
            index < actions.len(),
            "chooser returned index {index} for {} actions",
            actions.len(),
        );
        self.play(&actions[index].clone());
    }

    fn advance_phase(&mut self) {
        match self.phase {
            RoundPhase::Dealt => {
                // The forced move is done: deal the rest of the first half,
                // first mover first.
                self.forced_value = None;
                let first = self.state.turn.opponent();
                for _ in 0..2 {
                    let cards = self.state.deck.deal(4);
                    self.state.players[first].take_deal(cards);
                    let cards = self.state.deck.deal(4);
                    self.state.players[first.opponent()].take_deal(cards);
                }
                self.phase = RoundPhase::FirstHalfPlay;
            }
            RoundPhase::FirstHalfPlay => {
                if self.hands_empty() {
                    self.phase = RoundPhase::SecondHalfDeal;
                }
            }
            RoundPhase::SecondHalfPlay => {
                // Terminal detection happens in is_over/score.
            }
            RoundPhase::SecondHalfDeal | RoundPhase::Scored => {
                unreachable!("no moves are played during {:?}", self.phase)
            }
        }
    }

    /// Deal the second half: twelve cards to each player, mover first.
    pub fn deal_second_half(&mut self) {
        assert_eq!(
            self.phase,
            RoundPhase::SecondHalfDeal,
            "second-half deal out of order",
        );
        let mover = self.state.turn;
        for _ in 0..3 {
            let cards = self.state.deck.deal(4);
            self.state.players[mover].take_deal(cards);
            let cards = self.state.deck.deal(4);
            self.state.players[mover.opponent()].take_deal(cards);
        }
        assert!(self.state.deck.is_empty(), "deck not exhausted after deal");
        self.phase = RoundPhase::SecondHalfPlay;
    }

    fn hands_empty(&self) -> bool {
        self.state.players.iter().all(|(_, p)| p.hand.is_empty())
    }

    /// True once every card has been played.
    #[must_use]
    pub fn is_over(&self) -> bool {
        self.phase == RoundPhase::SecondHalfPlay && self.hands_empty()
    }

    /// Score the finished round.
    ///
    /// Leftover table cards go to whoever last picked up. A strict capture
    /// majority (more than half the deck) earns 4 points, otherwise both
    /// players take 2. Sweeps are worth `SWEEP_BONUS` each. `carry` is the
    /// running differential from previous rounds; the outcome returns it
    /// updated by this round's totals.
    pub fn score(&mut self, carry: i64) -> RoundOutcome {
        assert!(self.is_over(), "scoring before the round is over");

        if !self.state.table.is_empty() {
            if let Some(picker) = self.state.last_to_pick_up {
                let leftovers = self.state.table.take_all_cards();
                let gained: i64 = leftovers.iter().map(|c| c.points()).sum();
                self.state.players[picker].points += gained;
                self.state.players[picker].captured.extend(leftovers);
            }
        }

        let p0 = PlayerId::new(0);
        let p1 = PlayerId::new(1);
        if self.state.players[p0].captured.len() > MAJORITY_THRESHOLD {
            self.state.players[p0].points += 4;
        } else if self.state.players[p1].captured.len() > MAJORITY_THRESHOLD {
            self.state.players[p1].points += 4;
        } else {
            self.state.players[p0].points += 2;
            self.state.players[p1].points += 2;
        }

        let totals = PlayerPair::from_fn(|p| {
            let player = &self.state.players[p];
            player.points + SWEEP_BONUS * player.sweeps as i64
        });

        self.phase = RoundPhase::Scored;
        RoundOutcome {
            differential: carry + totals[p0] - totals[p1],
            totals,
        }
    }

    /// Serialize the round for checkpointing.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    /// Restore a checkpointed round.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

/// Play a full round with one chooser driving both seats.
///
/// `carry` is the running differential entering the round.
pub fn run_round(
    opening: PlayerId,
    rng: GameRng,
    chooser: &mut dyn Chooser,
    carry: i64,
) -> RoundOutcome {
    let mut round = Round::deal(opening, rng);

    while !round.is_over() {
        if round.phase() == RoundPhase::SecondHalfDeal {
            round.deal_second_half();
            continue;
        }
        let actions = round.legal_actions();
        let index = chooser.choose(round.state(), &actions);
        round.play_indexed(index);
    }

    round.score(carry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank, Suit};
    use crate::chooser::RandomChooser;

    #[test]
    fn test_opening_deal_shape() {
        let round = Round::deal(PlayerId::new(0), GameRng::new(42));
        let state = round.state();

        assert_eq!(state.players[PlayerId::new(0)].hand.len(), 4);
        assert_eq!(state.players[PlayerId::new(1)].hand.len(), 4);
        assert_eq!(state.table.len(), 4);
        assert_eq!(state.deck.len(), 40);
        assert_eq!(state.total_cards(), 52);
        assert_eq!(round.phase(), RoundPhase::Dealt);
    }

    #[test]
    fn test_opening_hand_contains_high_card() {
        for seed in 0..20 {
            let round = Round::deal(PlayerId::new(0), GameRng::new(seed));
            let declared = round.forced_value().expect("declaration in force");
            assert!(declared >= 9, "declared {declared} from a guaranteed 9+");
            assert!(round.state().players[PlayerId::new(0)]
                .hand
                .iter()
                .any(|c| c.value() == declared));
        }
    }

    #[test]
    fn test_forced_declaration_filters_actions() {
        let round = Round::deal(PlayerId::new(0), GameRng::new(42));
        let declared = round.forced_value().unwrap();

        let actions = round.legal_actions();

        assert!(!actions.is_empty());
        assert!(actions.iter().all(|a| a.value == declared));
    }

    #[test]
    fn test_first_move_triggers_remainder_deal() {
        let mut round = Round::deal(PlayerId::new(0), GameRng::new(42));

        round.play_indexed(0);

        assert_eq!(round.phase(), RoundPhase::FirstHalfPlay);
        assert!(round.forced_value().is_none());
        // First mover played one of twelve, opponent holds all twelve.
        assert_eq!(round.state().players[PlayerId::new(0)].hand.len(), 11);
        assert_eq!(round.state().players[PlayerId::new(1)].hand.len(), 12);
        assert_eq!(round.state().deck.len(), 24);
        assert_eq!(round.state().total_cards(), 52);
    }

    #[test]
    fn test_full_round_reaches_score() {
        let mut chooser = RandomChooser::new(GameRng::new(7));
        let outcome = run_round(PlayerId::new(0), GameRng::new(42), &mut chooser, 0);

        // All 52 cards were captured or left over; totals include the
        // 2/2 or 4 bonus so both cannot be zero.
        assert!(outcome.totals[PlayerId::new(0)] + outcome.totals[PlayerId::new(1)] >= 4);
        assert_eq!(
            outcome.differential,
            outcome.totals[PlayerId::new(0)] - outcome.totals[PlayerId::new(1)]
        );
    }

    #[test]
    fn test_round_conserves_cards_throughout() {
        let mut round = Round::deal(PlayerId::new(1), GameRng::new(3));
        let mut chooser = RandomChooser::new(GameRng::new(11));

        while !round.is_over() {
            if round.phase() == RoundPhase::SecondHalfDeal {
                round.deal_second_half();
                continue;
            }
            let actions = round.legal_actions();
            let index = chooser.choose(round.state(), &actions);
            round.play_indexed(index);

            assert_eq!(round.state().total_cards(), 52);
            assert!(round.state().table.is_consistent());
        }
    }

    #[test]
    fn test_deterministic_round() {
        let mut c1 = RandomChooser::new(GameRng::new(9));
        let mut c2 = RandomChooser::new(GameRng::new(9));

        let o1 = run_round(PlayerId::new(0), GameRng::new(5), &mut c1, 0);
        let o2 = run_round(PlayerId::new(0), GameRng::new(5), &mut c2, 0);

        assert_eq!(o1, o2);
    }

    #[test]
    fn test_leftovers_go_to_last_picker() {
        let mut round = Round::deal(PlayerId::new(0), GameRng::new(42));
        let mut chooser = RandomChooser::new(GameRng::new(1));

        while !round.is_over() {
            if round.phase() == RoundPhase::SecondHalfDeal {
                round.deal_second_half();
                continue;
            }
            let actions = round.legal_actions();
            let index = chooser.choose(round.state(), &actions);
            round.play_indexed(index);
        }

        let leftover = round.state().table.card_count();
        let picker = round.state().last_to_pick_up;
        let captured_before: usize = match picker {
            Some(p) => round.state().players[p].captured.len(),
            None => 0,
        };

        round.score(0);

        if let Some(p) = picker {
            assert_eq!(
                round.state().players[p].captured.len(),
                captured_before + leftover
            );
            assert!(round.state().table.is_empty());
        }
        assert_eq!(round.phase(), RoundPhase::Scored);
    }

    #[test]
    fn test_leftover_points_credited_to_last_picker() {
        // 3♠ and K♣ stranded on the table at round end: 3 points of
        // leftovers, all owed to the last player who picked up.
        let mut state = GameState::new(PlayerId::new(0), GameRng::new(42));
        state.deck.deal(52);
        state.table.push_card(Card::new(Rank::Three, Suit::Spades));
        state.table.push_card(Card::new(Rank::King, Suit::Clubs));
        state.last_to_pick_up = Some(PlayerId::new(1));
        let mut round = Round {
            state,
            phase: RoundPhase::SecondHalfPlay,
            forced_value: None,
        };

        let outcome = round.score(0);

        let picker = &round.state.players[PlayerId::new(1)];
        assert_eq!(picker.captured.len(), 2);
        // 3 from the leftover spade plus the no-majority split of 2.
        assert_eq!(picker.points, 3 + 2);
        assert_eq!(round.state.players[PlayerId::new(0)].points, 2);
        assert!(round.state.table.is_empty());
        assert_eq!(outcome.totals[PlayerId::new(1)], 5);
    }

    #[test]
    fn test_next_opening_rules() {
        let current = PlayerId::new(1);
        assert_eq!(next_opening(-10, current), PlayerId::new(0));
        assert_eq!(next_opening(25, current), PlayerId::new(1));
        assert_eq!(next_opening(0, current), current);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut round = Round::deal(PlayerId::new(0), GameRng::new(42));
        round.play_indexed(0);

        let bytes = round.to_bytes().expect("serialize");
        let restored = Round::from_bytes(&bytes).expect("deserialize");

        assert_eq!(restored.phase(), round.phase());
        assert_eq!(restored.state().total_cards(), 52);
        assert_eq!(
            restored.state().players[PlayerId::new(0)].hand,
            round.state().players[PlayerId::new(0)].hand
        );
        assert_eq!(restored.legal_actions(), round.legal_actions());
    }

    #[test]
    fn test_round_totals_stay_bounded() {
        // Card points total 96; the bonus adds at most 4 and each sweep 50.
        let deck_points: i64 = crate::cards::Deck::standard()
            .cards()
            .iter()
            .map(|c| c.points())
            .sum();
        assert_eq!(deck_points, 96);

        let mut chooser = RandomChooser::new(GameRng::new(2));
        let outcome = run_round(PlayerId::new(0), GameRng::new(8), &mut chooser, 0);
        let combined = outcome.totals[PlayerId::new(0)] + outcome.totals[PlayerId::new(1)];
        assert!(combined >= 4, "bonus points alone guarantee 4");
        assert!(combined <= deck_points + 4 + 52 * SWEEP_BONUS);
    }
}
