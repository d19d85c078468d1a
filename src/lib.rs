//! # parcom
//!
//! A small recursive-descent parsing engine built from composable combinators.
//!
//! Grammars are ordinary values: primitives match literal text or single
//! characters, and sequences, repetitions, ordered alternations and named
//! references compose them into rules. A [`Grammar`] holds the rules and drives
//! a parse, accepting an input only when its root rule consumes all of it.
//!
//! ```text
//! let grammar = Grammar::builder("digits")
//!     .rule("digits", repetition(char_class(CharClass::range('0', '9')), 1))
//!     .build()?;
//!
//! assert!(grammar.parse("123").is_some());
//! assert!(grammar.parse("12a").is_none());
//! ```
//!
//! Failure to match is `None` everywhere. It carries no position or expected
//! set; the only things that can go wrong with a diagnostic are mistakes in the
//! grammar itself, reported as [`GrammarError`] when the grammar is built.

pub mod char_class;
pub mod combinator;
pub mod config;
pub mod error;
pub mod formats;
pub mod grammar;
pub mod grammars;
pub mod node;
pub mod snapshot;
pub mod state;

pub use char_class::CharClass;
pub use combinator::{
    alternation, char_class, literal, optional, reference, repetition, sequence, Combinator,
};
pub use error::GrammarError;
pub use grammar::{Grammar, GrammarBuilder, RuleSet};
pub use node::ParseNode;
pub use snapshot::{NodeSnapshot, ToSnapshot};
pub use state::ParseState;
