//! Action execution: the three mutating transitions.
//!
//! Execution trusts the generator: only actions from the current legal list
//! are ever applied (the round driver enforces membership). Invariants that
//! could fail are checked before any state is touched, so a transition
//! either applies completely or panics before mutation begins.

use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::action::{Action, ActionKind, ActionRecord};
use crate::core::state::GameState;
use crate::table::{CreatorSet, Pile, TableItemRef};

/// Apply a generator-produced action and advance the turn.
pub fn apply(state: &mut GameState, action: &Action) {
    let mover = state.turn;

    match action.kind {
        ActionKind::PickUp => {
            state.players[mover].remove_from_hand(action.card);

            let mut picked: Vec<Card> = vec![action.card];
            for &item in &action.items {
                match item {
                    TableItemRef::Pile(id) => {
                        picked.extend(state.table.take_pile(id).into_cards());
                    }
                    TableItemRef::Card(c) => {
                        picked.push(state.table.take_card(c));
                    }
                }
            }

            let gained: i64 = picked.iter().map(|c| c.points()).sum();
            state.players[mover].points += gained;
            state.players[mover].captured.extend(picked);

            // A sweep only counts while cards remain to be played; the last
            // capture of the round clearing the table is not one.
            if state.table.is_empty() && state.cards_remain() {
                state.players[mover].sweeps += 1;
            }

            state.last_to_pick_up = Some(mover);
        }

        ActionKind::PileOn => {
            // Re-check the sum before touching anything; a malformed pile
            // must never leave the table half-mutated.
            let item_sum: u32 = action
                .items
                .iter()
                .map(|&i| state.table.item_value(i) as u32)
                .sum();
            assert!(
                (item_sum + action.card.value() as u32) % action.value as u32 == 0,
                "pile-on of {} at {} does not complete a multiple",
                action.card,
                action.value,
            );

            state.players[mover].remove_from_hand(action.card);

            let mut cards: SmallVec<[Card; 8]> = SmallVec::new();
            cards.push(action.card);
            let mut creators = CreatorSet::empty();

            for &item in &action.items {
                match item {
                    TableItemRef::Pile(id) => {
                        let pile = state.table.take_pile(id);
                        // Merging into the same declared value inherits its
                        // creators; absorbing a different pile does not.
                        if pile.value() == action.value {
                            creators = pile.creators();
                        }
                        cards.extend(pile.into_cards());
                    }
                    TableItemRef::Card(c) => {
                        cards.push(state.table.take_card(c));
                    }
                }
            }

            creators.insert(mover);
            let id = state.table.alloc_pile_id();
            state
                .table
                .install_pile(Pile::new(id, creators, cards, action.value));
        }

        ActionKind::Throw => {
            state.players[mover].remove_from_hand(action.card);
            state.table.push_card(action.card);
        }
    }

    debug_assert!(state.table.is_consistent());

    let sequence = state.history.len() as u32;
    state.record(ActionRecord {
        player: mover,
        action: action.clone(),
        sequence,
    });
    state.turn = mover.opponent();
}
