//! Action representation: played card + target value + consumed items.
//!
//! An action is one of three moves:
//! - `PickUp`: capture table items matching the played card's value
//! - `PileOn`: build or extend a pile at a declared value
//! - `Throw`: discard the played card to the table
//!
//! PickUp and PileOn always consume at least one table item; Throw never
//! does. The constructors enforce this before any state is touched, so a
//! malformed action cannot reach execution.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::Card;
use crate::table::TableItemRef;

/// The three move kinds, in display/sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    PickUp,
    PileOn,
    Throw,
}

/// A complete move.
///
/// `value` is the capture value the move targets: the played card's own
/// value for PickUp and Throw, the declared pile value for PileOn. `items`
/// lists the table items the move consumes, in search order.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub card: Card,
    pub value: u8,
    /// Consumed table items. SmallVec keeps the common small captures
    /// off the heap.
    pub items: SmallVec<[TableItemRef; 4]>,
}

impl Action {
    /// Capture `items` with `card`.
    ///
    /// Panics if `items` is empty: a capture must consume something.
    #[must_use]
    pub fn pick_up(card: Card, items: impl IntoIterator<Item = TableItemRef>) -> Self {
        let items: SmallVec<[TableItemRef; 4]> = items.into_iter().collect();
        assert!(!items.is_empty(), "a pick-up must consume table items");
        Self {
            kind: ActionKind::PickUp,
            card,
            value: card.value(),
            items,
        }
    }

    /// Pile `card` onto `items` at declared `value`.
    ///
    /// Panics if `items` is empty: piling always involves table items.
    #[must_use]
    pub fn pile_on(card: Card, value: u8, items: impl IntoIterator<Item = TableItemRef>) -> Self {
        let items: SmallVec<[TableItemRef; 4]> = items.into_iter().collect();
        assert!(!items.is_empty(), "a pile-on must consume table items");
        Self {
            kind: ActionKind::PileOn,
            card,
            value,
            items,
        }
    }

    /// Throw `card` to the table.
    #[must_use]
    pub fn throw(card: Card) -> Self {
        Self {
            kind: ActionKind::Throw,
            card,
            value: card.value(),
            items: SmallVec::new(),
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ActionKind::PickUp => write!(f, "[PICK_UP {}] {}", self.value, self.card)?,
            ActionKind::PileOn => write!(f, "[PILE_ON {}] {}", self.value, self.card)?,
            ActionKind::Throw => return write!(f, "[THROW] {}", self.card),
        }
        write!(f, " with {} item(s)", self.items.len())
    }
}

/// A recorded move with metadata for history tracking.
///
/// Used for replay, debugging, and training data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who moved.
    pub player: PlayerId,

    /// The move taken.
    pub action: Action,

    /// Zero-based move index within the round.
    pub sequence: u32,
}
