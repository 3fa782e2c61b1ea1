//! LR(0) items and the closure and goto operations over item sets.
//!
//! An item is a production with a dot marking how much of its right side
//! has been recognized. Item sets are ordered sets, so two sets with the
//! same items compare equal regardless of how they were produced; the
//! automaton builder relies on that for state deduplication.

use std::collections::{BTreeSet, VecDeque};

use crate::grammar::{Grammar, SymbolId};

/// A dotted production: `prod` indexes into the grammar's productions,
/// `dot` counts recognized right-hand symbols, so it ranges from 0 to
/// the right side's length inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Item {
    pub prod: usize,
    pub dot: usize,
}

/// A set of items, ordered by (production, dot).
pub type ItemSet = BTreeSet<Item>;

impl Item {
    pub fn new(prod: usize, dot: usize) -> Item {
        Item { prod, dot }
    }

    /// Symbol immediately after the dot, or `None` for a completed item.
    pub fn next_symbol(&self, grammar: &Grammar) -> Option<SymbolId> {
        grammar.production(self.prod).rhs.get(self.dot).copied()
    }

    /// True when the dot has passed the whole right side.
    pub fn is_complete(&self, grammar: &Grammar) -> bool {
        self.dot >= grammar.production(self.prod).rhs.len()
    }

    fn advanced(&self) -> Item {
        Item::new(self.prod, self.dot + 1)
    }
}

/// Computes the LR(0) *closure* of a set of items.
///
/// Whenever an item's dot stands before a nonterminal, the initial items
/// of all that nonterminal's productions join the set, repeating until
/// no new items appear.
///
/// Runs a worklist to a fixed point; the set only ever grows and the
/// item count is bounded by the grammar, so this terminates. Closing a
/// closed set returns it unchanged.
///
/// # Example
/// ```text
/// Given the item for `E' -> . E`
/// and productions `E -> E + T`, `E -> T`, `T -> i`,
/// the closure adds the initial items of every E and T production.
/// ```
pub fn closure(items: &ItemSet, grammar: &Grammar) -> ItemSet {
    let mut closed = items.clone();
    let mut pending: VecDeque<Item> = closed.iter().copied().collect();
    while let Some(item) = pending.pop_front() {
        let Some(sym) = item.next_symbol(grammar) else {
            continue;
        };
        if !grammar.is_nonterminal(sym) {
            continue;
        }
        for (prod, p) in grammar.productions().iter().enumerate() {
            if p.lhs == sym {
                let predicted = Item::new(prod, 0);
                if closed.insert(predicted) {
                    pending.push_back(predicted);
                }
            }
        }
    }
    closed
}

/// Computes the LR(0) *goto* function for an item set and a symbol.
///
/// Advances every item in `items` whose dot stands before `sym`, then
/// closes the result. An empty result means the automaton has no
/// transition on `sym`.
///
/// # Example
/// ```text
/// From items containing `E -> E . + T`, goto on `+` yields the
/// closure of `E -> E + . T`, which predicts the T productions.
/// ```
pub fn goto(items: &ItemSet, sym: SymbolId, grammar: &Grammar) -> ItemSet {
    let mut moved = ItemSet::new();
    for item in items {
        if item.next_symbol(grammar) == Some(sym) {
            moved.insert(item.advanced());
        }
    }
    closure(&moved, grammar)
}
