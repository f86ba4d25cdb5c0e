//! The shared table: loose cards and piles.
//!
//! ## Single Source of Truth
//!
//! Pile data lives in one arena keyed by `PileId`. The append-ordered entry
//! list and the value index both hold ids, never duplicated pile objects, so
//! the three structures cannot disagree about pile membership.
//!
//! ## Key Types
//!
//! - `TableEntry`: what sits on the table (a bare card or a pile id)
//! - `TableItemRef`: how actions and search results reference table items
//! - `Table`: the ordered table plus the pile arena and value index

pub mod pile;

pub use pile::{CreatorSet, Pile, PileId};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// One slot on the table, in append order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableEntry {
    Card(Card),
    Pile(PileId),
}

/// Reference to a table item as carried by actions and search results.
///
/// Bare cards are self-identifying (each card exists once per round); piles
/// are referenced by their stable arena id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableItemRef {
    Card(Card),
    Pile(PileId),
}

/// The shared table.
///
/// Entry order is append order; it matters for display only. Pile lookups by
/// declared value go through the value index, which holds at most one pile
/// per value in 9..=13.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    entries: Vec<TableEntry>,
    piles: FxHashMap<PileId, Pile>,
    by_value: FxHashMap<u8, PileId>,
    next_pile_id: u32,
}

impl Table {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries in append order.
    #[must_use]
    pub fn entries(&self) -> &[TableEntry] {
        &self.entries
    }

    /// Number of entries (loose cards plus piles).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is on the table.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Item references in append order.
    pub fn item_refs(&self) -> impl Iterator<Item = TableItemRef> + '_ {
        self.entries.iter().map(|entry| match entry {
            TableEntry::Card(c) => TableItemRef::Card(*c),
            TableEntry::Pile(id) => TableItemRef::Pile(*id),
        })
    }

    /// Capture value of a referenced item.
    #[must_use]
    pub fn item_value(&self, item: TableItemRef) -> u8 {
        match item {
            TableItemRef::Card(c) => c.value(),
            TableItemRef::Pile(id) => self.pile(id).value(),
        }
    }

    /// Total cards on the table, counting cards inside piles.
    #[must_use]
    pub fn card_count(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                TableEntry::Card(_) => 1,
                TableEntry::Pile(id) => self.pile(*id).cards().len(),
            })
            .sum()
    }

    /// Allocate the next pile id.
    pub fn alloc_pile_id(&mut self) -> PileId {
        let id = PileId(self.next_pile_id);
        self.next_pile_id += 1;
        id
    }

    /// Append a loose card.
    pub fn push_card(&mut self, card: Card) {
        self.entries.push(TableEntry::Card(card));
    }

    /// Remove a loose card.
    ///
    /// The card must be on the table; consuming an absent card is a logic
    /// fault.
    pub fn take_card(&mut self, card: Card) -> Card {
        let pos = self
            .entries
            .iter()
            .position(|&e| e == TableEntry::Card(card))
            .unwrap_or_else(|| panic!("{card} is not on the table"));
        self.entries.remove(pos);
        card
    }

    /// Install a pile into the arena, entry list, and value index.
    ///
    /// Any previous pile at the same value must already have been consumed;
    /// the value index holds at most one pile per value.
    pub fn install_pile(&mut self, pile: Pile) {
        let id = pile.id();
        let value = pile.value();
        assert!(
            !self.by_value.contains_key(&value),
            "a pile of {value} is already on the table"
        );
        self.entries.push(TableEntry::Pile(id));
        self.by_value.insert(value, id);
        self.piles.insert(id, pile);
    }

    /// Remove a pile from all three structures and return it.
    pub fn take_pile(&mut self, id: PileId) -> Pile {
        let pile = self
            .piles
            .remove(&id)
            .unwrap_or_else(|| panic!("pile {id:?} is not in the arena"));
        self.by_value.remove(&pile.value());
        let pos = self
            .entries
            .iter()
            .position(|&e| e == TableEntry::Pile(id))
            .unwrap_or_else(|| panic!("pile {id:?} is not on the table"));
        self.entries.remove(pos);
        pile
    }

    /// Look up a pile by arena id.
    #[must_use]
    pub fn pile(&self, id: PileId) -> &Pile {
        &self.piles[&id]
    }

    /// Look up the pile at a declared value, if any.
    #[must_use]
    pub fn pile_at_value(&self, value: u8) -> Option<&Pile> {
        self.by_value.get(&value).map(|id| &self.piles[id])
    }

    /// All live piles, in no particular order.
    pub fn piles(&self) -> impl Iterator<Item = &Pile> {
        self.piles.values()
    }

    /// Drain every card off the table, including cards inside piles.
    ///
    /// Used by round-end scoring to hand leftovers to the last captor.
    pub fn take_all_cards(&mut self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.card_count());
        for entry in self.entries.drain(..) {
            match entry {
                TableEntry::Card(c) => cards.push(c),
                TableEntry::Pile(id) => {
                    let pile = self
                        .piles
                        .remove(&id)
                        .unwrap_or_else(|| panic!("pile {id:?} is not in the arena"));
                    self.by_value.remove(&pile.value());
                    cards.extend(pile.into_cards());
                }
            }
        }
        cards
    }

    /// Check that the entry list, arena, and value index agree.
    ///
    /// Used by tests and debug assertions after every execution.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let listed: Vec<PileId> = self
            .entries
            .iter()
            .filter_map(|e| match e {
                TableEntry::Pile(id) => Some(*id),
                TableEntry::Card(_) => None,
            })
            .collect();

        listed.len() == self.piles.len()
            && listed.iter().all(|id| self.piles.contains_key(id))
            && self.by_value.len() == self.piles.len()
            && self
                .by_value
                .iter()
                .all(|(v, id)| self.piles.get(id).is_some_and(|p| p.value() == *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Rank, Suit};
    use crate::core::player::PlayerId;

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    fn nine_pile(table: &mut Table) -> PileId {
        let id = table.alloc_pile_id();
        let pile = Pile::new(
            id,
            CreatorSet::single(PlayerId::new(0)),
            [card(Rank::Four, Suit::Hearts), card(Rank::Five, Suit::Clubs)],
            9,
        );
        table.install_pile(pile);
        id
    }

    #[test]
    fn test_push_and_take_card() {
        let mut table = Table::new();
        let two = card(Rank::Two, Suit::Hearts);

        table.push_card(two);
        assert_eq!(table.len(), 1);

        table.take_card(two);
        assert!(table.is_empty());
    }

    #[test]
    #[should_panic(expected = "not on the table")]
    fn test_take_missing_card_panics() {
        let mut table = Table::new();
        table.take_card(card(Rank::Two, Suit::Hearts));
    }

    #[test]
    fn test_install_and_take_pile() {
        let mut table = Table::new();
        let id = nine_pile(&mut table);

        assert!(table.is_consistent());
        assert_eq!(table.pile_at_value(9).map(Pile::id), Some(id));
        assert_eq!(table.card_count(), 2);

        let pile = table.take_pile(id);
        assert_eq!(pile.cards().len(), 2);
        assert!(table.is_empty());
        assert!(table.pile_at_value(9).is_none());
        assert!(table.is_consistent());
    }

    #[test]
    #[should_panic(expected = "already on the table")]
    fn test_duplicate_value_pile_panics() {
        let mut table = Table::new();
        nine_pile(&mut table);

        let id = table.alloc_pile_id();
        let other = Pile::new(
            id,
            CreatorSet::empty(),
            [card(Rank::Nine, Suit::Spades)],
            9,
        );
        table.install_pile(other);
    }

    #[test]
    fn test_item_values() {
        let mut table = Table::new();
        let two = card(Rank::Two, Suit::Hearts);
        table.push_card(two);
        let id = nine_pile(&mut table);

        assert_eq!(table.item_value(TableItemRef::Card(two)), 2);
        assert_eq!(table.item_value(TableItemRef::Pile(id)), 9);

        let refs: Vec<_> = table.item_refs().collect();
        assert_eq!(refs, vec![TableItemRef::Card(two), TableItemRef::Pile(id)]);
    }

    #[test]
    fn test_pile_ids_are_not_reused() {
        let mut table = Table::new();
        let first = table.alloc_pile_id();
        let second = table.alloc_pile_id();
        assert_ne!(first, second);
    }
}
