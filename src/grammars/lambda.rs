//! Lambda calculus with booleans, naturals and conditionals
//!
//! ```text
//! term   <- zero / true / false / succ / pred / iszero / if / app / var / abs
//! var    <- [a-z]
//! app    <- (var (ws var)+)
//! abs    <- ("λ" var "." term)
//! if     <- ("if" ws term ws "then" ws term ws "else" ws term)
//! succ   <- ("succ" ws term)
//! ws     <- " "+
//! ```
//!
//! Application is left-associative: `x y z` is `((x y) z)`.

use crate::char_class::CharClass;
use crate::combinator::{alternation, char_class, literal, reference, repetition, sequence, Combinator};
use crate::error::GrammarError;
use crate::grammar::Grammar;
use crate::node::ParseNode;
use crate::snapshot::{NodeSnapshot, ToSnapshot};
use std::fmt;

/// A lambda-calculus term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    Zero,
    True,
    False,
    Succ(Box<Term>),
    Pred(Box<Term>),
    IsZero(Box<Term>),
    Var(String),
    Abs { param: String, body: Box<Term> },
    App(Box<Term>, Box<Term>),
    If(Box<Term>, Box<Term>, Box<Term>),
}

impl Term {
    pub fn var(name: &str) -> Self {
        Term::Var(name.to_string())
    }

    pub fn succ(term: Term) -> Self {
        Term::Succ(Box::new(term))
    }

    pub fn pred(term: Term) -> Self {
        Term::Pred(Box::new(term))
    }

    pub fn is_zero(term: Term) -> Self {
        Term::IsZero(Box::new(term))
    }

    pub fn abs(param: &str, body: Term) -> Self {
        Term::Abs {
            param: param.to_string(),
            body: Box::new(body),
        }
    }

    pub fn app(left: Term, right: Term) -> Self {
        Term::App(Box::new(left), Box::new(right))
    }

    pub fn if_then_else(condition: Term, consequent: Term, alternative: Term) -> Self {
        Term::If(
            Box::new(condition),
            Box::new(consequent),
            Box::new(alternative),
        )
    }

    fn node_type(&self) -> &'static str {
        match self {
            Term::Zero => "Zero",
            Term::True => "True",
            Term::False => "False",
            Term::Succ(_) => "Succ",
            Term::Pred(_) => "Pred",
            Term::IsZero(_) => "IsZero",
            Term::Var(_) => "Var",
            Term::Abs { .. } => "Abs",
            Term::App(..) => "App",
            Term::If(..) => "If",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Zero => f.write_str("0"),
            Term::True => f.write_str("true"),
            Term::False => f.write_str("false"),
            Term::Succ(t) => write!(f, "(succ {})", t),
            Term::Pred(t) => write!(f, "(pred {})", t),
            Term::IsZero(t) => write!(f, "(iszero {})", t),
            Term::Var(name) => f.write_str(name),
            Term::Abs { param, body } => write!(f, "(λ{}.{})", param, body),
            Term::App(left, right) => write!(f, "({} {})", left, right),
            Term::If(c, t, e) => write!(f, "(if {} then {} else {})", c, t, e),
        }
    }
}

impl ToSnapshot for Term {
    fn to_snapshot(&self) -> NodeSnapshot {
        let snapshot = NodeSnapshot::new(self.node_type(), self.to_string());
        match self {
            Term::Zero | Term::True | Term::False | Term::Var(_) => snapshot,
            Term::Succ(t) | Term::Pred(t) | Term::IsZero(t) => snapshot.with_child(t.to_snapshot()),
            Term::Abs { param, body } => snapshot
                .with_child(NodeSnapshot::new("Var", param.as_str()))
                .with_child(body.to_snapshot()),
            Term::App(left, right) => snapshot
                .with_child(left.to_snapshot())
                .with_child(right.to_snapshot()),
            Term::If(c, t, e) => snapshot.with_children([c, t, e].map(|term| term.to_snapshot())),
        }
    }
}

/// The terms among a node's children, skipping keywords and whitespace
fn terms(node: ParseNode<Term>) -> Option<Vec<Term>> {
    Some(
        node.into_children()?
            .into_iter()
            .filter_map(ParseNode::into_value)
            .collect(),
    )
}

/// `keyword ws term`, wrapped by `build`
fn prefix_operator(keyword: &str, build: fn(Term) -> Term) -> Combinator<Term> {
    sequence(vec![literal(keyword), reference("ws"), reference("term")])
        .try_map(move |node| terms(node)?.pop().map(build))
}

/// Fold `x y z ...` into left-nested applications
fn application(node: ParseNode<Term>) -> Option<Term> {
    let mut parts = node.into_children()?.into_iter();
    let head = parts.next()?.into_value()?;
    parts
        .next()?
        .into_children()?
        .into_iter()
        .try_fold(head, |left, arg| Some(Term::app(left, terms(arg)?.pop()?)))
}

fn abstraction(node: ParseNode<Term>) -> Option<Term> {
    let [param, body]: [Term; 2] = terms(node)?.try_into().ok()?;
    match param {
        Term::Var(name) => Some(Term::abs(&name, body)),
        _ => None,
    }
}

fn conditional(node: ParseNode<Term>) -> Option<Term> {
    let [c, t, e]: [Term; 3] = terms(node)?.try_into().ok()?;
    Some(Term::if_then_else(c, t, e))
}

/// Build the lambda-calculus grammar, rooted at `term`
pub fn grammar() -> Result<Grammar<Term>, GrammarError> {
    let ws = || reference("ws");
    let term = || reference("term");

    Grammar::builder("term")
        .rule(
            "term",
            alternation(
                ["zero", "true", "false", "succ", "pred", "iszero", "if", "app", "var", "abs"]
                    .into_iter()
                    .map(reference)
                    .collect(),
            ),
        )
        .rule(
            "var",
            char_class(CharClass::range('a', 'z'))
                .try_map(|node| node.as_char().map(|c| Term::Var(c.to_string()))),
        )
        .rule(
            "app",
            sequence(vec![
                reference("var"),
                repetition(sequence(vec![ws(), reference("var")]), 1),
            ])
            .try_map(application),
        )
        .rule(
            "abs",
            sequence(vec![literal("λ"), reference("var"), literal("."), term()]).try_map(abstraction),
        )
        .rule(
            "if",
            sequence(vec![
                literal("if"),
                ws(),
                term(),
                ws(),
                literal("then"),
                ws(),
                term(),
                ws(),
                literal("else"),
                ws(),
                term(),
            ])
            .try_map(conditional),
        )
        .rule("zero", literal("0").map(|_| Term::Zero))
        .rule("true", literal("true").map(|_| Term::True))
        .rule("false", literal("false").map(|_| Term::False))
        .rule("succ", prefix_operator("succ", Term::succ))
        .rule("pred", prefix_operator("pred", Term::pred))
        .rule("iszero", prefix_operator("iszero", Term::is_zero))
        .rule("ws", repetition(literal(" "), 1))
        .build()
}
