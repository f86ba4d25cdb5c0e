//! The valid-action generator.
//!
//! For each hand card of the player to move:
//! - every no-addition capture group becomes a PickUp (and suppresses Throw)
//! - a card that is the sole key to an owned pile of its own value is locked
//!   to that pile: no PileOn or Throw is generated for it
//! - for each high value 9..=13 held as a *different* card, every forced-
//!   addition group becomes a PileOn (finding any group against an owned
//!   pile at that value also suppresses Throw)
//! - Throw is emitted only when never suppressed
//!
//! Output ordering is a contract for deterministic display and indexing:
//! PickUp before PileOn before Throw, source order preserved within a kind.

use crate::core::action::{Action, ActionKind};
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::cards::Card;
use crate::search::capture_groups;
use crate::table::TableItemRef;

/// True when `card` is locked to a pile it keys.
///
/// A card whose value anchors a pile the mover created, with no other card
/// of that value in hand, must stay available to capture that pile: it may
/// neither be thrown nor piled elsewhere this turn.
fn pile_locked(state: &GameState, mover: PlayerId, card: Card) -> bool {
    match state.table.pile_at_value(card.value()) {
        Some(pile) => {
            pile.creators().contains(mover)
                && !state.players[mover].holds_other_of_value(card.value(), card)
        }
        None => false,
    }
}

/// Enumerate the complete legal-action set for the player to move.
///
/// Panics if a non-empty hand yields no actions: the lock-out rule is the
/// only suppressor of Throw besides an available capture, so an empty set
/// is a logic fault, never "no move".
#[must_use]
pub fn legal_actions(state: &GameState) -> Vec<Action> {
    let mover = state.turn;
    let hand = state.players[mover].hand.clone();
    let mut actions: Vec<Action> = Vec::new();

    for &card in &hand {
        let mut can_throw = true;

        for group in capture_groups(&state.table, mover, card.value(), None) {
            actions.push(Action::pick_up(card, group));
            can_throw = false;
        }

        if pile_locked(state, mover, card) {
            continue;
        }

        for value in 9..=13u8 {
            if !state.players[mover].holds_other_of_value(value, card) {
                continue;
            }
            let groups = capture_groups(&state.table, mover, value, Some(card));
            if !groups.is_empty()
                && state
                    .table
                    .pile_at_value(value)
                    .is_some_and(|p| p.creators().contains(mover))
            {
                can_throw = false;
            }
            for mut group in groups {
                let pos = group
                    .iter()
                    .position(|&item| item == TableItemRef::Card(card))
                    .expect("forced addition must appear in its group");
                group.remove(pos);
                actions.push(Action::pile_on(card, value, group));
            }
        }

        if can_throw {
            actions.push(Action::throw(card));
        }
    }

    // Stable: source order within a kind is part of the contract.
    actions.sort_by_key(|a| a.kind);

    assert!(
        !(actions.is_empty() && !hand.is_empty()),
        "no legal actions for a non-empty hand; hand={:?} table={:?}",
        hand,
        state.table.entries(),
    );

    actions
}
