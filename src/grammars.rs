//! Ready-made grammars built on the combinator engine
//!
//! - `lambda`: untyped lambda calculus with booleans and natural numbers
//! - `number`: optionally signed decimal integers

pub mod lambda;
pub mod number;

/// Names accepted by [`describe`] and the command-line `--grammar` option
pub const GRAMMAR_NAMES: &[&str] = &["lambda", "number"];

/// One-line description of a ready-made grammar
pub fn describe(name: &str) -> Option<&'static str> {
    match name {
        "lambda" => Some("Lambda calculus with booleans, naturals and conditionals"),
        "number" => Some("Optionally signed decimal integers"),
        _ => None,
    }
}
