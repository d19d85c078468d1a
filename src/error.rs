//! Errors raised while building a grammar
//!
//! A failed match is not an error: combinators report it as `None`. The types
//! here cover mistakes in the grammar itself, which are caught once when the
//! grammar is built rather than on every parse.

/// A grammar that cannot be built
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    /// The designated root rule has no definition.
    #[error("root rule '{0}' is not defined")]
    UndefinedRoot(String),

    /// Two rules were registered under the same name.
    #[error("rule '{0}' is defined more than once")]
    DuplicateRule(String),

    /// A rule name is not an identifier (`[A-Za-z_][A-Za-z0-9_]*`).
    #[error("invalid rule name '{0}'")]
    InvalidRuleName(String),

    /// A reference points at a rule that does not exist.
    #[error("rule '{rule}' refers to undefined rule '{reference}'")]
    UndefinedReference {
        /// The rule containing the reference.
        rule: String,
        /// The name that failed to resolve.
        reference: String,
    },

    /// A character-class pattern is not a valid bracket expression.
    #[error("invalid character class [{pattern}]: {message}")]
    InvalidCharClass {
        /// The bracket-expression body as given.
        pattern: String,
        /// Why the pattern was rejected.
        message: String,
    },
}
