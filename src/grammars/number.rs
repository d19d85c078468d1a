//! Optionally signed decimal integers
//!
//! ```text
//! signed <- sign? digits
//! sign   <- "+" / "-"
//! digits <- [0-9]+
//! ```
//!
//! `digits` keeps its generic repetition node; `signed` turns its match into
//! an `i64` and declines values that do not fit.

use crate::char_class::CharClass;
use crate::combinator::{alternation, char_class, literal, optional, reference, repetition, sequence};
use crate::error::GrammarError;
use crate::grammar::Grammar;
use crate::snapshot::{NodeSnapshot, ToSnapshot};

impl ToSnapshot for i64 {
    fn to_snapshot(&self) -> NodeSnapshot {
        NodeSnapshot::new("Integer", self.to_string())
    }
}

/// Build the integer grammar, rooted at `signed`
pub fn grammar() -> Result<Grammar<i64>, GrammarError> {
    Grammar::builder("signed")
        .rule(
            "signed",
            sequence(vec![optional(reference("sign")), reference("digits")])
                .try_map(|node| node.matched_text()?.parse().ok()),
        )
        .rule("sign", alternation(vec![literal("+"), literal("-")]))
        .rule("digits", repetition(char_class(CharClass::range('0', '9')), 1))
        .build()
}
