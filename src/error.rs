//! Error types reported while building a table.

use thiserror::Error;

/// Errors detected while parsing, augmenting, or checking a grammar, or
/// while filling in the parse table.
///
/// Earlier stages win: a malformed production is reported before any
/// augmentation problem, and conflicts are only ever reported for a
/// grammar that passed every structural check.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A production line violated the surface syntax: it must contain
    /// exactly one `->`, no `|`, no `.`, and a single left-hand symbol.
    #[error("malformed production ({reason}): {line:?}")]
    MalformedProduction {
        /// The offending input line, verbatim.
        line: String,
        /// What the line violated.
        reason: &'static str,
    },

    /// The input contained no productions at all.
    #[error("grammar has no productions")]
    EmptyGrammar,

    /// A reserved name was already taken: either the end marker `$`
    /// appeared in the input, or the primed start symbol synthesized by
    /// augmentation already existed.
    #[error("symbol {symbol:?} collides with a reserved augmentation name")]
    AugmentCollision { symbol: String },

    /// A right-hand side referenced a nonterminal that never appears on
    /// the left of any production.
    #[error("nonterminal {symbol:?} in production {production} has no productions")]
    UndefinedNonterminal { symbol: String, production: usize },

    /// A production with an empty right-hand side was found. Epsilon
    /// productions are outside the SLR(1) subset handled here.
    #[error("production {production} has an empty right-hand side")]
    EmptyProduction { production: usize },

    /// A state both shifts and reduces on the same lookahead, so the
    /// grammar is not SLR(1).
    #[error("shift/reduce conflict at state {state}, symbol {symbol:?}")]
    ShiftReduceConflict { state: usize, symbol: String },

    /// A state reduces by two different productions on the same
    /// lookahead, so the grammar is not SLR(1).
    #[error("reduce/reduce conflict at state {state}, symbol {symbol:?}")]
    ReduceReduceConflict { state: usize, symbol: String },
}
