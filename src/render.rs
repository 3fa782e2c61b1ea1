//! Plain-text renderers for grammars, item sets, symbol sets, and the
//! finished table. All writers take any [`io::Write`] sink so output
//! can go to stdout, a file, or a buffer in tests.

use std::collections::BTreeSet;
use std::io::{self, Write};

use crate::automaton::Automaton;
use crate::grammar::{Grammar, SymbolId};
use crate::item::Item;
use crate::table::{Action, SlrTable};

/// Writes the numbered production list, one per line.
pub fn write_prods<W: Write>(out: &mut W, grammar: &Grammar) -> io::Result<()> {
    for (i, prod) in grammar.productions().iter().enumerate() {
        write!(out, "{}: {} ->", i, grammar.symbol_name(prod.lhs))?;
        for &sym in &prod.rhs {
            write!(out, " {}", grammar.symbol_name(sym))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn write_item<W: Write>(out: &mut W, grammar: &Grammar, item: &Item) -> io::Result<()> {
    let prod = grammar.production(item.prod);
    write!(out, "{} ->", grammar.symbol_name(prod.lhs))?;
    for (i, &sym) in prod.rhs.iter().enumerate() {
        if i == item.dot {
            write!(out, " .")?;
        }
        write!(out, " {}", grammar.symbol_name(sym))?;
    }
    if item.dot == prod.rhs.len() {
        write!(out, " .")?;
    }
    writeln!(out)
}

/// Writes every state's item set as an `I<n>` block, separated by blank
/// lines.
pub fn write_states<W: Write>(
    out: &mut W,
    grammar: &Grammar,
    automaton: &Automaton,
) -> io::Result<()> {
    for (id, state) in automaton.states().iter().enumerate() {
        writeln!(out, "I{id}")?;
        for item in state {
            write_item(out, grammar, item)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes one labeled line per set, e.g. `FOLLOW(E) = { + $ }`. The
/// slice is indexed by symbol id, so it fits both FIRST over all
/// symbols and FOLLOW over the nonterminal prefix.
pub fn write_fstflw<W: Write>(
    out: &mut W,
    grammar: &Grammar,
    label: &str,
    sets: &[BTreeSet<SymbolId>],
) -> io::Result<()> {
    for (sym, set) in sets.iter().enumerate() {
        write!(out, "{}({}) = {{", label, grammar.symbol_name(sym))?;
        for &member in set {
            write!(out, " {}", grammar.symbol_name(member))?;
        }
        writeln!(out, " }}")?;
    }
    Ok(())
}

/// Writes the table as tab-separated rows: one row per state, terminal
/// action columns first (`s<n>`, `r<n>`, `acc`, blank for error), then
/// goto columns for each nonterminal except the augmented start, which
/// never has entries.
pub fn write_table<W: Write>(out: &mut W, slr: &SlrTable) -> io::Result<()> {
    let grammar = &slr.grammar;
    let terminals = grammar.n_nonterminals()..grammar.n_symbols();
    let nonterminals = 1..grammar.n_nonterminals();

    write!(out, "State")?;
    for sym in terminals.clone().chain(nonterminals.clone()) {
        write!(out, "\t{}", grammar.symbol_name(sym))?;
    }
    writeln!(out)?;

    for state in 0..slr.automaton.n_states() {
        write!(out, "{state}")?;
        for sym in terminals.clone() {
            match slr.table.action(state, sym) {
                Some(Action::Shift(target)) => write!(out, "\ts{target}")?,
                Some(Action::Reduce(prod)) => write!(out, "\tr{prod}")?,
                Some(Action::Accept) => write!(out, "\tacc")?,
                None => write!(out, "\t")?,
            }
        }
        for sym in nonterminals.clone() {
            match slr.table.goto_state(state, sym) {
                Some(target) => write!(out, "\t{target}")?,
                None => write!(out, "\t")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::build_table;

    fn paren_table() -> SlrTable {
        build_table(&["E -> ( E )", "E -> i"]).unwrap()
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> io::Result<()>,
    {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn prods_list_is_numbered() {
        let slr = paren_table();
        let text = render(|out| write_prods(out, &slr.grammar));
        assert_eq!(text, "0: E' -> E\n1: E -> ( E )\n2: E -> i\n");
    }

    #[test]
    fn states_show_dot_positions() {
        let slr = paren_table();
        let text = render(|out| write_states(out, &slr.grammar, &slr.automaton));
        assert!(text.starts_with("I0\nE' -> . E\nE -> . ( E )\nE -> . i\n\n"));
        assert!(text.contains("E -> i .\n"));
        assert!(text.contains("\nI5\n"));
    }

    #[test]
    fn sets_print_members_in_id_order() {
        let slr = paren_table();
        let text = render(|out| write_fstflw(out, &slr.grammar, "FOLLOW", slr.follow.sets()));
        assert_eq!(text, "FOLLOW(E') = { $ }\nFOLLOW(E) = { ) $ }\n");
    }

    #[test]
    fn table_rows_hold_actions_then_gotos() {
        let slr = paren_table();
        let text = render(|out| write_table(out, &slr));
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("State\t(\t)\ti\t$\tE"));
        assert_eq!(lines.next(), Some("0\ts2\t\ts3\t\t1"));
        assert!(text.contains("\tacc"));
        assert!(text.contains("\tr2"));
    }
}
