//! Canonical collection of LR(0) item sets and the goto transitions
//! between them.

use std::collections::{BTreeMap, VecDeque};

use crate::grammar::{Grammar, SymbolId};
use crate::item::{self, Item, ItemSet};

/// Index of a state in the automaton.
pub type StateId = usize;

/// The LR(0) goto automaton: one item set per state plus the transition
/// relation. State 0 is always the closure of the initial item of the
/// start production.
///
/// States are discovered breadth first, trying symbols in increasing id
/// order from each state, and a freshly computed item set is looked up
/// among the existing states before being numbered. Numbering is
/// therefore a pure function of the grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    states: Vec<ItemSet>,
    transitions: Vec<BTreeMap<SymbolId, StateId>>,
}

impl Automaton {
    /// Builds the canonical collection for an augmented grammar.
    ///
    /// Expects production 0 to be the augmentation production; calling
    /// this on an unaugmented grammar seeds the automaton from whatever
    /// production happens to be first instead.
    pub fn build(grammar: &Grammar) -> Automaton {
        let initial = item::closure(&ItemSet::from([Item::new(0, 0)]), grammar);
        let mut states = vec![initial];
        let mut transitions: Vec<BTreeMap<SymbolId, StateId>> = vec![BTreeMap::new()];
        let mut pending = VecDeque::from([0]);

        while let Some(state) = pending.pop_front() {
            for sym in grammar.symbols() {
                let next = item::goto(&states[state], sym, grammar);
                if next.is_empty() {
                    continue;
                }
                let target = match states.iter().position(|s| *s == next) {
                    Some(existing) => existing,
                    None => {
                        states.push(next);
                        transitions.push(BTreeMap::new());
                        pending.push_back(states.len() - 1);
                        states.len() - 1
                    }
                };
                transitions[state].insert(sym, target);
            }
        }
        log::debug!("canonical collection has {} states", states.len());

        Automaton { states, transitions }
    }

    pub fn n_states(&self) -> usize {
        self.states.len()
    }

    /// Item set of `state`. Panics if out of range.
    pub fn state(&self, state: StateId) -> &ItemSet {
        &self.states[state]
    }

    pub fn states(&self) -> &[ItemSet] {
        &self.states
    }

    /// Target of the transition from `state` on `sym`, if there is one.
    pub fn transition(&self, state: StateId, sym: SymbolId) -> Option<StateId> {
        self.transitions[state].get(&sym).copied()
    }

    /// All outgoing transitions of `state`, keyed by symbol.
    pub fn transitions_from(&self, state: StateId) -> &BTreeMap<SymbolId, StateId> {
        &self.transitions[state]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn expr_automaton() -> (Grammar, Automaton) {
        let g = Grammar::parse_productions(&["E -> E + T", "E -> T", "T -> i"])
            .unwrap()
            .augment()
            .unwrap();
        let a = Automaton::build(&g);
        (g, a)
    }

    fn items(pairs: &[(usize, usize)]) -> ItemSet {
        pairs.iter().map(|&(prod, dot)| Item::new(prod, dot)).collect()
    }

    #[test]
    fn builds_expected_states() {
        // Augmented ids: E'=0 E=1 T=2 +=3 i=4 $=5.
        let (_, a) = expr_automaton();
        assert_eq!(a.n_states(), 6);
        assert_eq!(a.state(0), &items(&[(0, 0), (1, 0), (2, 0), (3, 0)]));
        assert_eq!(a.state(1), &items(&[(0, 1), (1, 1)]));
        assert_eq!(a.state(2), &items(&[(2, 1)]));
        assert_eq!(a.state(3), &items(&[(3, 1)]));
        assert_eq!(a.state(4), &items(&[(1, 2), (3, 0)]));
        assert_eq!(a.state(5), &items(&[(1, 3)]));
    }

    #[test]
    fn transitions_share_existing_states() {
        let (_, a) = expr_automaton();
        assert_eq!(a.transition(0, 4), Some(3));
        // The i transition out of state 4 rejoins state 3 instead of
        // minting a duplicate.
        assert_eq!(a.transition(4, 4), Some(3));
        assert_eq!(a.transition(4, 2), Some(5));
        assert_eq!(a.transition(0, 0), None);
        assert_eq!(a.transition(2, 3), None);
    }

    #[test]
    fn every_state_is_reachable_from_initial() {
        let (_, a) = expr_automaton();
        let mut seen = BTreeSet::from([0]);
        let mut queue = vec![0];
        while let Some(state) = queue.pop() {
            for (_, &target) in a.transitions_from(state) {
                if seen.insert(target) {
                    queue.push(target);
                }
            }
        }
        assert_eq!(seen.len(), a.n_states());
    }

    #[test]
    fn construction_is_deterministic() {
        let (g, a) = expr_automaton();
        assert_eq!(Automaton::build(&g), a);
    }
}
