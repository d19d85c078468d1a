//! Combinators: the building blocks of a grammar
//!
//! A [`Combinator`] is a tagged description of a parser. Running it with
//! [`Combinator::apply`] is a pure function from a [`ParseState`] to either a
//! `(node, next_state)` pair or `None`. A failing combinator never hands back a
//! state, so nothing it tried is visible to its caller.
//!
//! Grammars are written with the factory functions in this module:
//!
//! ```text
//! let digits = repetition(char_class(CharClass::range('0', '9')), 1);
//! let sign = optional(alternation(vec![literal("+"), literal("-")]));
//! let signed = sequence(vec![sign, reference("digits")]);
//! ```
//!
//! Any combinator can carry a transform hook, attached with
//! [`Combinator::map`] or [`Combinator::try_map`]. The hook runs right after a
//! successful match and its result replaces the generic node as a
//! [`ParseNode::Value`].
//!
//! # Repetition over empty matches
//!
//! A repeated combinator is expected to consume input on every success. When
//! one succeeds without moving the cursor, the repetition keeps that single
//! match and stops, since running it again from the same state can only produce
//! the same result. Such a match satisfies any minimum: the node holds one
//! child for it, however many repetitions were required.

use crate::char_class::CharClass;
use crate::grammar::RuleSet;
use crate::node::ParseNode;
use crate::state::ParseState;
use log::{trace, warn};
use std::fmt;
use std::sync::Arc;

/// Post-match hook. Returning `None` declines the match.
pub type Transform<T> = Arc<dyn Fn(ParseNode<T>) -> Option<T> + Send + Sync>;

/// Outcome of running a combinator: the node and the state after it, or no match
pub type Match<'a, T> = Option<(ParseNode<T>, ParseState<'a>)>;

/// A parser built by composition
pub struct Combinator<T> {
    kind: Kind<T>,
    transform: Option<Transform<T>>,
}

enum Kind<T> {
    Literal(String),
    CharClass(CharClass),
    Sequence(Vec<Combinator<T>>),
    Repetition {
        inner: Box<Combinator<T>>,
        min: usize,
        max: Option<usize>,
    },
    Alternation(Vec<Combinator<T>>),
    Reference(String),
}

/// Match `expected` exactly
pub fn literal<T>(expected: &str) -> Combinator<T> {
    Combinator::new(Kind::Literal(expected.to_string()))
}

/// Match one character belonging to `class`
pub fn char_class<T>(class: CharClass) -> Combinator<T> {
    Combinator::new(Kind::CharClass(class))
}

/// Match every part, in order
pub fn sequence<T>(parts: Vec<Combinator<T>>) -> Combinator<T> {
    Combinator::new(Kind::Sequence(parts))
}

/// Match `inner` as many times as possible, requiring at least `min` matches
pub fn repetition<T>(inner: Combinator<T>, min: usize) -> Combinator<T> {
    Combinator::new(Kind::Repetition {
        inner: Box::new(inner),
        min,
        max: None,
    })
}

/// Match `inner` zero or one time
pub fn optional<T>(inner: Combinator<T>) -> Combinator<T> {
    Combinator::new(Kind::Repetition {
        inner: Box::new(inner),
        min: 0,
        max: Some(1),
    })
}

/// Match the first of `choices` that succeeds
pub fn alternation<T>(choices: Vec<Combinator<T>>) -> Combinator<T> {
    Combinator::new(Kind::Alternation(choices))
}

/// Match the rule called `name`, looked up when the combinator runs
pub fn reference<T>(name: &str) -> Combinator<T> {
    Combinator::new(Kind::Reference(name.to_string()))
}

impl<T> Combinator<T> {
    fn new(kind: Kind<T>) -> Self {
        Combinator {
            kind,
            transform: None,
        }
    }

    /// Attach a hook that turns the matched node into a domain value
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(ParseNode<T>) -> T + Send + Sync + 'static,
    {
        self.try_map(move |node| Some(f(node)))
    }

    /// Attach a hook that may decline the match by returning `None`.
    ///
    /// A declined match is reported as no match, exactly as if the
    /// combinator itself had failed.
    pub fn try_map<F>(mut self, f: F) -> Self
    where
        F: Fn(ParseNode<T>) -> Option<T> + Send + Sync + 'static,
    {
        self.transform = Some(Arc::new(f));
        self
    }

    /// Names of every rule this combinator refers to, in order of appearance
    pub fn references(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'s>(&'s self, names: &mut Vec<&'s str>) {
        match &self.kind {
            Kind::Literal(_) | Kind::CharClass(_) => {}
            Kind::Sequence(parts) | Kind::Alternation(parts) => {
                for part in parts {
                    part.collect_references(names);
                }
            }
            Kind::Repetition { inner, .. } => inner.collect_references(names),
            Kind::Reference(name) => names.push(name),
        }
    }

    /// Run this combinator at `state`, resolving references through `rules`
    pub fn apply<'a>(&self, rules: &dyn RuleSet<T>, state: ParseState<'a>) -> Match<'a, T> {
        let (node, next) = match &self.kind {
            Kind::Literal(expected) => {
                let width = expected.chars().count();
                if state.peek(width) != expected.as_str() {
                    return None;
                }
                (ParseNode::Literal(expected.clone()), state.read(width))
            }
            Kind::CharClass(class) => {
                let c = state.peek(1).chars().next()?;
                if !class.matches(c) {
                    return None;
                }
                (ParseNode::Char(c), state.read(1))
            }
            Kind::Sequence(parts) => {
                let mut children = Vec::with_capacity(parts.len());
                let mut current = state;
                for part in parts {
                    let (child, next) = part.apply(rules, current)?;
                    children.push(child);
                    current = next;
                }
                (ParseNode::Sequence(children), current)
            }
            Kind::Repetition { inner, min, max } => {
                let mut children = Vec::new();
                let mut current = state;
                let mut stalled = false;
                while max.map_or(true, |max| children.len() < max) {
                    let Some((child, next)) = inner.apply(rules, current) else {
                        break;
                    };
                    stalled = next.offset() == current.offset();
                    children.push(child);
                    current = next;
                    if stalled {
                        break;
                    }
                }
                if !stalled && children.len() < *min {
                    return None;
                }
                (ParseNode::Repetition(children), current)
            }
            Kind::Alternation(choices) => choices
                .iter()
                .find_map(|choice| choice.apply(rules, state))?,
            Kind::Reference(name) => {
                trace!("rule '{}' at offset {}", name, state.offset());
                let Some(rule) = rules.resolve(name) else {
                    warn!("reference to undefined rule '{}'", name);
                    return None;
                };
                rule.apply(rules, state)?
            }
        };

        match &self.transform {
            None => Some((node, next)),
            Some(transform) => transform(node).map(|value| (ParseNode::Value(value), next)),
        }
    }
}

impl<T> Clone for Combinator<T> {
    fn clone(&self) -> Self {
        let kind = match &self.kind {
            Kind::Literal(expected) => Kind::Literal(expected.clone()),
            Kind::CharClass(class) => Kind::CharClass(class.clone()),
            Kind::Sequence(parts) => Kind::Sequence(parts.clone()),
            Kind::Repetition { inner, min, max } => Kind::Repetition {
                inner: inner.clone(),
                min: *min,
                max: *max,
            },
            Kind::Alternation(choices) => Kind::Alternation(choices.clone()),
            Kind::Reference(name) => Kind::Reference(name.clone()),
        };
        Combinator {
            kind,
            transform: self.transform.clone(),
        }
    }
}

impl<T> fmt::Display for Combinator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn joined<T>(
            f: &mut fmt::Formatter<'_>,
            items: &[Combinator<T>],
            separator: &str,
        ) -> fmt::Result {
            f.write_str("(")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    f.write_str(separator)?;
                }
                write!(f, "{}", item)?;
            }
            f.write_str(")")
        }

        match &self.kind {
            Kind::Literal(expected) => write!(f, "{:?}", expected),
            Kind::CharClass(class) => write!(f, "{}", class),
            Kind::Sequence(parts) => joined(f, parts, " "),
            Kind::Alternation(choices) => joined(f, choices, " / "),
            Kind::Repetition { inner, min, max } => match (min, max) {
                (0, None) => write!(f, "{}*", inner),
                (1, None) => write!(f, "{}+", inner),
                (0, Some(1)) => write!(f, "{}?", inner),
                (min, None) => write!(f, "{}{{{},}}", inner, min),
                (min, Some(max)) => write!(f, "{}{{{},{}}}", inner, min, max),
            },
            Kind::Reference(name) => f.write_str(name),
        }
    }
}

impl<T> fmt::Debug for Combinator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combinator")
            .field("expr", &format_args!("{}", self))
            .field("transform", &self.transform.is_some())
            .finish()
    }
}
