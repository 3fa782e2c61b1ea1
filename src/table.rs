//! SLR(1) action and goto tables, plus the whole-pipeline entry point.
//!
//! Terminals and nonterminals live in separate namespaces: a terminal
//! column holds shift, reduce, or accept actions, a nonterminal column
//! holds goto targets only. Absent cells mean a syntax error at parse
//! time. Any attempt to fill a cell twice with different actions aborts
//! construction, so a finished table is conflict free by construction.

use std::collections::BTreeMap;

use crate::automaton::{Automaton, StateId};
use crate::error::GrammarError;
use crate::follow::FollowTable;
use crate::grammar::{Grammar, SymbolId};

/// A parse action in a terminal column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Consume the lookahead and enter the state.
    Shift(StateId),
    /// Reduce by the production with this index.
    Reduce(usize),
    /// Input matches the start production; parsing is done.
    Accept,
}

/// A finished SLR(1) parse table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    actions: BTreeMap<(StateId, SymbolId), Action>,
    gotos: BTreeMap<(StateId, SymbolId), StateId>,
}

impl Table {
    /// Fills the table from the automaton and FOLLOW sets.
    ///
    /// Per state: terminal transitions become shifts, nonterminal
    /// transitions become gotos, and every completed item reduces by its
    /// production on each lookahead in FOLLOW of its left-hand side. The
    /// completed start production instead yields accept on the end
    /// marker. The first doubly claimed cell aborts construction with a
    /// conflict error naming the state and lookahead symbol.
    pub fn build(
        grammar: &Grammar,
        automaton: &Automaton,
        follow: &FollowTable,
    ) -> Result<Table, GrammarError> {
        let mut table = Table::default();
        for state in 0..automaton.n_states() {
            for (&sym, &target) in automaton.transitions_from(state) {
                if grammar.is_nonterminal(sym) {
                    table.gotos.insert((state, sym), target);
                } else {
                    table.insert_action(grammar, state, sym, Action::Shift(target))?;
                }
            }
            for item in automaton.state(state) {
                if !item.is_complete(grammar) {
                    continue;
                }
                if item.prod == 0 {
                    table.insert_action(grammar, state, grammar.end_marker(), Action::Accept)?;
                } else {
                    let lhs = grammar.production(item.prod).lhs;
                    for &lookahead in follow.of(lhs) {
                        table.insert_action(grammar, state, lookahead, Action::Reduce(item.prod))?;
                    }
                }
            }
        }
        log::debug!(
            "table has {} actions and {} gotos",
            table.actions.len(),
            table.gotos.len()
        );
        Ok(table)
    }

    fn insert_action(
        &mut self,
        grammar: &Grammar,
        state: StateId,
        sym: SymbolId,
        action: Action,
    ) -> Result<(), GrammarError> {
        match self.actions.get(&(state, sym)) {
            None => {
                self.actions.insert((state, sym), action);
                Ok(())
            }
            Some(existing) if *existing == action => Ok(()),
            Some(existing) => {
                let symbol = grammar.symbol_name(sym).to_owned();
                if matches!(existing, Action::Shift(_)) || matches!(action, Action::Shift(_)) {
                    Err(GrammarError::ShiftReduceConflict { state, symbol })
                } else {
                    Err(GrammarError::ReduceReduceConflict { state, symbol })
                }
            }
        }
    }

    /// Action for `state` on the lookahead `terminal`. `None` is a
    /// syntax error.
    pub fn action(&self, state: StateId, terminal: SymbolId) -> Option<Action> {
        self.actions.get(&(state, terminal)).copied()
    }

    /// State entered after reducing to `nonterminal` in `state`.
    pub fn goto_state(&self, state: StateId, nonterminal: SymbolId) -> Option<StateId> {
        self.gotos.get(&(state, nonterminal)).copied()
    }

    pub fn actions(&self) -> &BTreeMap<(StateId, SymbolId), Action> {
        &self.actions
    }

    pub fn gotos(&self) -> &BTreeMap<(StateId, SymbolId), StateId> {
        &self.gotos
    }
}

/// Everything `build_table` produces: the augmented grammar, its goto
/// automaton, the FOLLOW sets, and the finished table. Consumers need
/// the grammar and automaton alongside the table to interpret symbol
/// ids, production indices, and state numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlrTable {
    pub grammar: Grammar,
    pub automaton: Automaton,
    pub follow: FollowTable,
    pub table: Table,
}

/// Builds an SLR(1) table from grammar lines.
///
/// Stages run in a fixed order, and the first failing stage wins:
/// surface syntax, augmentation, referential checks, FOLLOW computation
/// (which rejects empty right sides), then table filling with conflict
/// detection. Automaton construction itself cannot fail.
///
/// The result is a pure function of the input lines, including state
/// numbering and which conflict is reported for a non-SLR(1) grammar.
pub fn build_table<S: AsRef<str>>(lines: &[S]) -> Result<SlrTable, GrammarError> {
    let grammar = Grammar::parse_productions(lines)?.augment()?;
    grammar.validate()?;
    log::debug!(
        "grammar has {} productions over {} nonterminals and {} terminals",
        grammar.productions().len(),
        grammar.n_nonterminals(),
        grammar.n_terminals()
    );
    let follow = FollowTable::compute(&grammar)?;
    let automaton = Automaton::build(&grammar);
    let table = Table::build(&grammar, &automaton, &follow)?;
    Ok(SlrTable {
        grammar,
        automaton,
        follow,
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr_table() -> SlrTable {
        build_table(&["E -> E + T", "E -> T", "T -> i"]).unwrap()
    }

    #[test]
    fn shifts_follow_terminal_transitions() {
        // Augmented ids: E'=0 E=1 T=2 +=3 i=4 $=5.
        let slr = expr_table();
        assert_eq!(slr.table.action(0, 4), Some(Action::Shift(3)));
        assert_eq!(slr.table.action(1, 3), Some(Action::Shift(4)));
        assert_eq!(slr.table.action(4, 4), Some(Action::Shift(3)));
    }

    #[test]
    fn reduces_cover_follow_of_left_side() {
        let slr = expr_table();
        // State 2 holds E -> T . and FOLLOW(E) = {+, $}.
        assert_eq!(slr.table.action(2, 3), Some(Action::Reduce(2)));
        assert_eq!(slr.table.action(2, 5), Some(Action::Reduce(2)));
        // State 5 holds E -> E + T . reducing by production 1.
        assert_eq!(slr.table.action(5, 3), Some(Action::Reduce(1)));
        assert_eq!(slr.table.action(5, 5), Some(Action::Reduce(1)));
    }

    #[test]
    fn accept_sits_where_the_start_production_completes() {
        let slr = expr_table();
        let end = slr.grammar.end_marker();
        // Not in the initial state but in the state reached from it on
        // the original start symbol.
        assert_eq!(slr.table.action(0, end), None);
        let accept_state = slr.automaton.transition(0, 1).unwrap();
        assert_eq!(slr.table.action(accept_state, end), Some(Action::Accept));
    }

    #[test]
    fn absent_cells_stay_absent() {
        let slr = expr_table();
        assert_eq!(slr.table.action(0, 3), None);
        assert_eq!(slr.table.action(3, 4), None);
        assert_eq!(slr.table.goto_state(1, 2), None);
    }

    #[test]
    fn gotos_follow_nonterminal_transitions() {
        let slr = expr_table();
        assert_eq!(slr.table.goto_state(0, 1), Some(1));
        assert_eq!(slr.table.goto_state(0, 2), Some(2));
        assert_eq!(slr.table.goto_state(4, 2), Some(5));
    }

    #[test]
    fn build_is_deterministic() {
        let lines = ["E -> E + T", "E -> T", "T -> i"];
        assert_eq!(build_table(&lines).unwrap(), build_table(&lines).unwrap());
    }

    #[test]
    fn dangling_else_reports_shift_reduce() {
        let err = build_table(&["S -> i S e S", "S -> i S", "S -> a"]).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::ShiftReduceConflict { ref symbol, .. } if symbol == "e"
        ));
    }

    #[test]
    fn common_reduction_reports_reduce_reduce() {
        let err = build_table(&["S -> A", "S -> B", "A -> a", "B -> a"]).unwrap_err();
        assert!(matches!(
            err,
            GrammarError::ReduceReduceConflict { ref symbol, .. } if symbol == "$"
        ));
    }

    #[test]
    fn classic_expression_grammar_builds_eleven_states() {
        let slr = build_table(&[
            "E -> E + T",
            "E -> E - T",
            "E -> T",
            "T -> ( E )",
            "T -> i",
        ])
        .unwrap();
        // Augmented ids: E'=0 E=1 T=2 +=3 -=4 (=5 )=6 i=7 $=8.
        assert_eq!(slr.automaton.n_states(), 11);
        assert_eq!(slr.table.action(0, 5), Some(Action::Shift(3)));
        assert_eq!(slr.table.action(0, 7), Some(Action::Shift(4)));
        let accept_state = slr.automaton.transition(0, 1).unwrap();
        assert_eq!(slr.table.action(accept_state, 8), Some(Action::Accept));
        // T -> ( E ) completes in the state reached on ) and reduces on
        // all of FOLLOW(T) = {+, -, ), $}.
        assert_eq!(slr.table.action(7, 6), Some(Action::Shift(10)));
        for lookahead in [3, 4, 6, 8] {
            assert_eq!(slr.table.action(10, lookahead), Some(Action::Reduce(4)));
        }
        assert_eq!(slr.table.goto_state(3, 1), Some(7));
        assert_eq!(slr.table.goto_state(5, 2), Some(8));
    }

    #[test]
    fn duplicate_productions_conflict() {
        let err = build_table(&["E -> i", "E -> i"]).unwrap_err();
        assert!(matches!(err, GrammarError::ReduceReduceConflict { .. }));
    }
}
