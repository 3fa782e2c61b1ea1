//! A minimal table-driven recognizer.
//!
//! Not a full parser: it builds no trees and calls no semantic actions,
//! it only walks the state stack to check that a token sequence belongs
//! to the grammar. Mostly useful for exercising freshly built tables.

use anyhow::{Result, bail};

use crate::table::{Action, SlrTable};

/// Runs `tokens` through the table, returning `Ok(())` on accept.
///
/// Tokens are terminal names; the end marker is appended internally and
/// must not be supplied. Errors describe the first failure: an unknown
/// or nonterminal token name, or the position and state at which no
/// action applies.
pub fn drive<S: AsRef<str>>(slr: &SlrTable, tokens: &[S]) -> Result<()> {
    let grammar = &slr.grammar;

    let mut input = Vec::with_capacity(tokens.len() + 1);
    for token in tokens {
        let name = token.as_ref();
        let Some(sym) = grammar.symbol_id(name) else {
            bail!("unknown symbol {name:?}");
        };
        if grammar.is_nonterminal(sym) {
            bail!("nonterminal {name:?} cannot appear in the input");
        }
        input.push(sym);
    }
    input.push(grammar.end_marker());

    let mut states = vec![0];
    let mut pos = 0;
    loop {
        let state = states[states.len() - 1];
        let lookahead = input[pos];
        match slr.table.action(state, lookahead) {
            Some(Action::Shift(target)) => {
                log::trace!("shift {:?} -> state {target}", grammar.symbol_name(lookahead));
                states.push(target);
                pos += 1;
            }
            Some(Action::Reduce(prod)) => {
                let production = grammar.production(prod);
                if states.len() <= production.rhs.len() {
                    bail!("state stack underflow reducing by production {prod}");
                }
                states.truncate(states.len() - production.rhs.len());
                let resume = states[states.len() - 1];
                let Some(target) = slr.table.goto_state(resume, production.lhs) else {
                    bail!(
                        "no goto for {:?} from state {resume}",
                        grammar.symbol_name(production.lhs)
                    );
                };
                log::trace!("reduce by production {prod} -> state {target}");
                states.push(target);
            }
            Some(Action::Accept) => {
                log::trace!("accept after {pos} tokens");
                return Ok(());
            }
            None => bail!(
                "syntax error at position {pos}: unexpected {:?} in state {state}",
                grammar.symbol_name(lookahead)
            ),
        }
    }
}
