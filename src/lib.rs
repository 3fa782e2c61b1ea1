//! # slrgen
//!
//! An SLR(1) parsing table generator.
//!
//! Grammars come in as plain production lines, one per line, with
//! whitespace-separated symbols:
//!
//! ```text
//! E -> E + T
//! E -> T
//! T -> i
//! ```
//!
//! [`build_table`] runs the whole pipeline: it parses the productions,
//! augments the grammar with a fresh start symbol, computes FOLLOW
//! sets, builds the canonical collection of LR(0) item sets, and fills
//! in the action and goto tables, rejecting any grammar that is not
//! SLR(1) with a conflict error naming the state and lookahead.
//!
//! Everything is deterministic: the same input lines always yield the
//! same symbol ids, state numbering, and table.
//!
//! ## Example
//!
//! ```
//! use slrgen::{Action, build_table, driver};
//!
//! let slr = build_table(&["E -> ( E )", "E -> i"])?;
//!
//! let i = slr.grammar.symbol_id("i").unwrap();
//! assert_eq!(slr.table.action(0, i), Some(Action::Shift(3)));
//!
//! driver::drive(&slr, &["(", "(", "i", ")", ")"])?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod automaton;
pub mod driver;
pub mod error;
pub mod follow;
pub mod grammar;
pub mod item;
pub mod render;
mod symtab;
pub mod table;

pub use crate::automaton::{Automaton, StateId};
pub use crate::error::GrammarError;
pub use crate::follow::{FollowTable, first_sets};
pub use crate::grammar::{END_MARKER, Grammar, Production, SymbolId};
pub use crate::item::{Item, ItemSet, closure, goto};
pub use crate::table::{Action, SlrTable, Table, build_table};
