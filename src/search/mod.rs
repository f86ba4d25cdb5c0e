//! Combination search: every legal way to capture a target value.
//!
//! `capture_groups` enumerates every **maximal set of disjoint table items**
//! whose values sum exactly to a target, optionally forcing one extra hand
//! card (the addition) to participate. Each returned group is one
//! tactically distinct capture; alternatives deliberately reuse the same
//! cards across groups.
//!
//! The table is bounded (a dozen loose items at most), so brute subset
//! enumeration over a bitmask pool is fast enough; the output set is the
//! contract, not the traversal order.

use smallvec::SmallVec;

use crate::cards::Card;
use crate::core::player::PlayerId;
use crate::table::{Table, TableItemRef};

/// One capture grouping: table items (plus, for pile-on searches, the
/// addition card) summing to the target.
pub type CaptureGroup = Vec<TableItemRef>;

/// Pool item under subset-sum, with the forced-addition flag.
#[derive(Clone, Copy)]
struct PoolItem {
    item: TableItemRef,
    value: u8,
    is_addition: bool,
}

/// Enumerate every maximal disjoint exact-sum grouping for `target`.
///
/// - Items whose value equals `target` ("equalities") are always eligible
///   and join every returned group.
/// - Strictly lower items form the subset-sum pool. Bare cards are always
///   poolable; a pile is poolable only when an `addition` is supplied, the
///   pile is not doubled, and `mover` is not one of its creators.
/// - An `addition` equal to the target counts as an equality; lower, it
///   joins the pool and must appear in every returned group; higher, no
///   grouping is possible.
///
/// When the search proper finds nothing but equalities exist, the
/// equalities alone are the capture, provided no addition was supplied or
/// the addition was itself an equality alongside at least one table item.
#[must_use]
pub fn capture_groups(
    table: &Table,
    mover: PlayerId,
    target: u8,
    addition: Option<Card>,
) -> Vec<CaptureGroup> {
    let mut equalities: Vec<TableItemRef> = Vec::new();
    let mut pool: Vec<PoolItem> = Vec::new();

    for item in table.item_refs() {
        let value = table.item_value(item);
        if value == target {
            equalities.push(item);
        } else if value < target {
            let poolable = match item {
                TableItemRef::Card(_) => true,
                TableItemRef::Pile(id) => {
                    let pile = table.pile(id);
                    addition.is_some() && !pile.is_doubled() && !pile.creators().contains(mover)
                }
            };
            if poolable {
                pool.push(PoolItem {
                    item,
                    value,
                    is_addition: false,
                });
            }
        }
    }

    let mut addition_is_equal = false;
    if let Some(card) = addition {
        if card.value() == target {
            addition_is_equal = true;
            equalities.push(TableItemRef::Card(card));
        } else if card.value() < target {
            pool.push(PoolItem {
                item: TableItemRef::Card(card),
                value: card.value(),
                is_addition: true,
            });
        } else {
            return Vec::new();
        }
    }

    pool.sort_by_key(|p| p.value);

    let mut combos = enumerate_maximal(&pool, target, addition_is_equal, &equalities);

    // With nothing to sum, matching-value items are still a capture, unless
    // the search was for a forced addition that has no equal partner.
    if combos.is_empty()
        && !equalities.is_empty()
        && (addition.is_none() || (addition_is_equal && equalities.len() > 1))
    {
        combos.push(equalities);
    }

    combos
}

fn enumerate_maximal(
    pool: &[PoolItem],
    target: u8,
    addition_is_equal: bool,
    equalities: &[TableItemRef],
) -> Vec<CaptureGroup> {
    assert!(pool.len() <= 24, "table pool too large to enumerate");

    // Every pool subset summing exactly to the target, as a bitmask.
    let mut groups: Vec<u32> = Vec::new();
    for mask in 1u32..(1 << pool.len()) {
        let sum: u32 = pool
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, p)| p.value as u32)
            .sum();
        if sum == target as u32 {
            groups.push(mask);
        }
    }

    let addition_mask: u32 = pool
        .iter()
        .enumerate()
        .filter(|(_, p)| p.is_addition)
        .map(|(i, _)| 1 << i)
        .sum();
    let require_addition = addition_mask != 0 && !addition_is_equal;

    let mut out = Vec::new();
    let mut chosen: SmallVec<[usize; 8]> = SmallVec::new();
    select(
        &groups,
        0,
        0,
        &mut chosen,
        &mut |used: u32, chosen: &[usize]| {
            if require_addition && used & addition_mask == 0 {
                return;
            }
            // Maximal: every unselected group overlaps the items in use.
            if !groups.iter().all(|g| g & used != 0) {
                return;
            }
            let mut combo: CaptureGroup = Vec::new();
            for &gi in chosen {
                let mask = groups[gi];
                for (i, p) in pool.iter().enumerate() {
                    if mask & (1 << i) != 0 {
                        combo.push(p.item);
                    }
                }
            }
            combo.extend_from_slice(equalities);
            out.push(combo);
        },
    );
    out
}

/// Walk every disjoint, non-empty selection of exact-sum groups.
fn select(
    groups: &[u32],
    idx: usize,
    used: u32,
    chosen: &mut SmallVec<[usize; 8]>,
    emit: &mut impl FnMut(u32, &[usize]),
) {
    if idx == groups.len() {
        if used != 0 {
            emit(used, chosen);
        }
        return;
    }
    select(groups, idx + 1, used, chosen, emit);
    if groups[idx] & used == 0 {
        chosen.push(idx);
        select(groups, idx + 1, used | groups[idx], chosen, emit);
        chosen.pop();
    }
}
