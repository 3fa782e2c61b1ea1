//! Grammar model: interned symbols, productions, augmentation, validation.
//!
//! A [`Grammar`] is built from plain production lines like `E -> E + T`,
//! one production per line. Symbols are whitespace-separated names; a name
//! is a nonterminal exactly when it appears on the left of some production.
//! All later stages work on dense symbol indices, never on names.

use crate::error::GrammarError;
use crate::symtab::Symtab;

/// Dense index of a symbol in a grammar.
///
/// Ids are assigned so that all nonterminals come before all terminals,
/// and the end marker is always the last id. `id < n_nonterminals()`
/// therefore decides nonterminal-ness in O(1).
pub type SymbolId = usize;

/// Name of the end-of-input marker, appended to every grammar's symbols.
pub const END_MARKER: &str = "$";

/// A single production: one left-hand nonterminal and a sequence of
/// right-hand symbols. The right side may be empty after parsing, but
/// empty productions are rejected before any set computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production {
    pub lhs: SymbolId,
    pub rhs: Vec<SymbolId>,
}

/// A context-free grammar over interned symbols.
///
/// The declared order of the input fixes everything downstream: symbol
/// ids follow first appearance (left-hand sides first, then remaining
/// right-hand names, then [`END_MARKER`]), production indices follow
/// input order, and the start symbol is the first left-hand symbol.
/// Two identical inputs therefore produce equal grammars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    symtab: Symtab,
    n_nonterminals: usize,
    /// Terminal count, end marker included.
    n_terminals: usize,
    productions: Vec<Production>,
    start: SymbolId,
    augmented: bool,
}

fn malformed(line: &str, reason: &'static str) -> GrammarError {
    GrammarError::MalformedProduction {
        line: line.to_owned(),
        reason,
    }
}

/// Surface-syntax check for one production line. The arrow must occur
/// exactly once, anywhere in the line, and `|` and `.` are reserved and
/// rejected outright.
fn check_production_line(line: &str) -> Result<(), GrammarError> {
    if line.matches("->").count() != 1 {
        return Err(malformed(line, "expected exactly one \"->\""));
    }
    if line.contains('|') {
        return Err(malformed(line, "\"|\" is reserved"));
    }
    if line.contains('.') {
        return Err(malformed(line, "\".\" is reserved"));
    }
    Ok(())
}

impl Grammar {
    /// Parses production lines into a grammar.
    ///
    /// Each line must hold exactly one `->` with a single symbol on its
    /// left; symbols on the right are whitespace-separated. Alternation
    /// must be spelled as separate lines, so `|` is rejected, as is `.`
    /// (it marks item positions in rendered output).
    ///
    /// The first left-hand symbol becomes the start symbol. The end
    /// marker `$` is appended as the last terminal and may not appear in
    /// the input itself.
    pub fn parse_productions<S: AsRef<str>>(lines: &[S]) -> Result<Grammar, GrammarError> {
        let mut raw: Vec<(&str, Vec<&str>)> = Vec::with_capacity(lines.len());
        for line in lines {
            let line = line.as_ref();
            check_production_line(line)?;
            let Some((left, right)) = line.split_once("->") else {
                return Err(malformed(line, "expected exactly one \"->\""));
            };
            let mut left_syms = left.split_whitespace();
            let (Some(lhs), None) = (left_syms.next(), left_syms.next()) else {
                return Err(malformed(line, "left side must be a single symbol"));
            };
            raw.push((lhs, right.split_whitespace().collect()));
        }
        if raw.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }

        // Left-hand symbols first, in order of appearance, so that
        // nonterminal ids form the prefix 0..n_nonterminals.
        let mut symtab = Symtab::new();
        for (lhs, _) in &raw {
            symtab.add(lhs);
        }
        let n_nonterminals = symtab.len();
        for (_, rhs) in &raw {
            for name in rhs {
                symtab.add(name);
            }
        }
        if symtab.get(END_MARKER).is_some() {
            return Err(GrammarError::AugmentCollision {
                symbol: END_MARKER.to_owned(),
            });
        }
        symtab.add(END_MARKER);
        let n_terminals = symtab.len() - n_nonterminals;

        let productions = raw
            .iter()
            .map(|(lhs, rhs)| Production {
                lhs: symtab.add(lhs),
                rhs: rhs.iter().map(|name| symtab.add(name)).collect(),
            })
            .collect();

        Ok(Grammar {
            symtab,
            n_nonterminals,
            n_terminals,
            productions,
            start: 0,
            augmented: false,
        })
    }

    /// Augments the grammar with a fresh start symbol.
    ///
    /// A primed copy of the start symbol (`E` becomes `E'`) takes id 0
    /// and every existing id shifts up by one; the new production
    /// `E' -> E` is prepended so it gets production index 0, which is
    /// what the automaton builder seeds its initial state with and what
    /// the table builder recognizes as the accept reduction.
    ///
    /// Augmenting an already augmented grammar returns it unchanged.
    /// If the primed name is already taken the grammar cannot be
    /// augmented and an [`GrammarError::AugmentCollision`] is returned.
    pub fn augment(self) -> Result<Grammar, GrammarError> {
        if self.augmented {
            return Ok(self);
        }
        let start_name = format!("{}'", self.symbol_name(self.start));
        if self.symtab.get(&start_name).is_some() {
            return Err(GrammarError::AugmentCollision { symbol: start_name });
        }

        let mut symtab = Symtab::new();
        symtab.add(&start_name);
        for name in self.symtab.iter() {
            symtab.add(name);
        }

        let mut productions = Vec::with_capacity(self.productions.len() + 1);
        productions.push(Production {
            lhs: 0,
            rhs: vec![self.start + 1],
        });
        productions.extend(self.productions.into_iter().map(|p| Production {
            lhs: p.lhs + 1,
            rhs: p.rhs.into_iter().map(|sym| sym + 1).collect(),
        }));

        Ok(Grammar {
            symtab,
            n_nonterminals: self.n_nonterminals + 1,
            n_terminals: self.n_terminals,
            productions,
            start: 0,
            augmented: true,
        })
    }

    /// Checks referential integrity: every right-hand symbol id must be
    /// interned, and every nonterminal used on a right side must have at
    /// least one production of its own.
    pub fn validate(&self) -> Result<(), GrammarError> {
        for (i, prod) in self.productions.iter().enumerate() {
            for &sym in &prod.rhs {
                if sym >= self.n_symbols() {
                    return Err(GrammarError::UndefinedNonterminal {
                        symbol: format!("#{sym}"),
                        production: i,
                    });
                }
                if self.is_nonterminal(sym) && !self.productions.iter().any(|p| p.lhs == sym) {
                    return Err(GrammarError::UndefinedNonterminal {
                        symbol: self.symbol_name(sym).to_owned(),
                        production: i,
                    });
                }
            }
        }
        if self.augmented {
            debug_assert_eq!(self.start, 0);
            debug_assert_eq!(
                self.productions.iter().filter(|p| p.lhs == self.start).count(),
                1
            );
            debug_assert_eq!(self.productions[0].rhs.len(), 1);
        }
        Ok(())
    }

    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Production at `idx`. Panics if out of range.
    pub fn production(&self, idx: usize) -> &Production {
        &self.productions[idx]
    }

    pub fn n_symbols(&self) -> usize {
        self.symtab.len()
    }

    pub fn n_nonterminals(&self) -> usize {
        self.n_nonterminals
    }

    /// Terminal count, end marker included.
    pub fn n_terminals(&self) -> usize {
        self.n_terminals
    }

    /// All symbol ids in increasing order.
    pub fn symbols(&self) -> std::ops::Range<SymbolId> {
        0..self.n_symbols()
    }

    pub fn is_nonterminal(&self, sym: SymbolId) -> bool {
        sym < self.n_nonterminals
    }

    pub fn is_terminal(&self, sym: SymbolId) -> bool {
        sym >= self.n_nonterminals && sym < self.n_symbols()
    }

    /// Id of the end-of-input marker, always the last symbol.
    pub fn end_marker(&self) -> SymbolId {
        self.n_symbols() - 1
    }

    pub fn start(&self) -> SymbolId {
        self.start
    }

    pub fn is_augmented(&self) -> bool {
        self.augmented
    }

    /// Name of `sym`. Panics if out of range.
    pub fn symbol_name(&self, sym: SymbolId) -> &str {
        self.symtab.name(sym)
    }

    pub fn symbol_id(&self, name: &str) -> Option<SymbolId> {
        self.symtab.get(name)
    }
}
