//! Grammars and the top-level driver
//!
//! A [`Grammar`] is a named collection of combinators with one designated root
//! rule. Rules refer to each other through [`reference`](crate::combinator::reference)
//! combinators, which look names up through the [`RuleSet`] trait each time
//! they run. Because the lookup is deferred, a rule may refer to itself or to
//! rules registered after it.
//!
//! ```text
//! let grammar = Grammar::builder("signed")
//!     .rule("signed", sequence(vec![optional(reference("sign")), reference("digits")]))
//!     .rule("sign", alternation(vec![literal("+"), literal("-")]))
//!     .rule("digits", repetition(char_class(CharClass::range('0', '9')), 1))
//!     .build()?;
//!
//! assert!(grammar.parse("-5").is_some());
//! assert!(grammar.parse("12a").is_none());
//! ```
//!
//! [`Grammar::parse`] accepts an input only when the root rule matches it from
//! the first character to the last. A match that leaves trailing input is
//! rejected like any other failure.

use crate::combinator::Combinator;
use crate::error::GrammarError;
use crate::node::ParseNode;
use crate::state::ParseState;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;

static RULE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("rule name pattern is valid"));

/// Name-to-combinator lookup used by reference combinators
pub trait RuleSet<T> {
    /// The combinator for the rule called `name`, if there is one
    fn resolve(&self, name: &str) -> Option<&Combinator<T>>;
}

impl<T> RuleSet<T> for HashMap<String, Combinator<T>> {
    fn resolve(&self, name: &str) -> Option<&Combinator<T>> {
        self.get(name)
    }
}

/// A validated, immutable set of rules with a root
pub struct Grammar<T> {
    root: String,
    rules: Vec<(String, Combinator<T>)>,
    index: HashMap<String, usize>,
}

impl<T> Grammar<T> {
    /// Start building a grammar whose entry point is the rule `root`
    pub fn builder(root: &str) -> GrammarBuilder<T> {
        GrammarBuilder::new(root)
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Rule names in registration order
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|(name, _)| name.as_str())
    }

    pub fn rule(&self, name: &str) -> Option<&Combinator<T>> {
        self.index.get(name).map(|&i| &self.rules[i].1)
    }

    /// Parse `input` with the root rule, requiring every character to be consumed
    pub fn parse(&self, input: &str) -> Option<ParseNode<T>> {
        self.parse_rule(&self.root, input)
    }

    /// Parse `input` with the rule `name` as the root
    pub fn parse_rule(&self, name: &str, input: &str) -> Option<ParseNode<T>> {
        let rule = self.rule(name)?;
        let (node, end) = rule.apply(self, ParseState::new(input))?;
        if end.is_complete() {
            Some(node)
        } else {
            debug!(
                "rule '{}' matched {} of {} bytes; rejecting trailing input",
                name,
                end.offset(),
                input.len()
            );
            None
        }
    }

    /// Parse `input` and return the root's domain value.
    ///
    /// `None` also covers a successful parse whose root node is not a `Value`.
    pub fn parse_value(&self, input: &str) -> Option<T> {
        self.parse(input)?.into_value()
    }
}

impl<T> RuleSet<T> for Grammar<T> {
    fn resolve(&self, name: &str) -> Option<&Combinator<T>> {
        self.rule(name)
    }
}

impl<T> fmt::Display for Grammar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.rules.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        let root_first = self
            .rule(&self.root)
            .map(|rule| (self.root.as_str(), rule))
            .into_iter()
            .chain(
                self.rules
                    .iter()
                    .filter(|(name, _)| *name != self.root)
                    .map(|(name, rule)| (name.as_str(), rule)),
            );
        for (name, rule) in root_first {
            writeln!(f, "{:width$} <- {}", name, rule, width = width)?;
        }
        Ok(())
    }
}

impl<T> fmt::Debug for Grammar<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("root", &self.root)
            .field("rules", &self.rules)
            .finish()
    }
}

/// Collects rules and validates them into a [`Grammar`]
pub struct GrammarBuilder<T> {
    root: String,
    rules: Vec<(String, Combinator<T>)>,
}

impl<T> GrammarBuilder<T> {
    pub fn new(root: &str) -> Self {
        GrammarBuilder {
            root: root.to_string(),
            rules: Vec::new(),
        }
    }

    /// Register a rule
    pub fn rule(mut self, name: &str, combinator: Combinator<T>) -> Self {
        self.rules.push((name.to_string(), combinator));
        self
    }

    /// Check names and references, then freeze the rules into a grammar
    pub fn build(self) -> Result<Grammar<T>, GrammarError> {
        let mut index = HashMap::with_capacity(self.rules.len());
        for (i, (name, _)) in self.rules.iter().enumerate() {
            if !RULE_NAME.is_match(name) {
                return Err(GrammarError::InvalidRuleName(name.clone()));
            }
            if index.insert(name.clone(), i).is_some() {
                return Err(GrammarError::DuplicateRule(name.clone()));
            }
        }

        if !index.contains_key(&self.root) {
            return Err(GrammarError::UndefinedRoot(self.root));
        }

        for (name, rule) in &self.rules {
            if let Some(missing) = rule
                .references()
                .into_iter()
                .find(|reference| !index.contains_key(*reference))
            {
                return Err(GrammarError::UndefinedReference {
                    rule: name.clone(),
                    reference: missing.to_string(),
                });
            }
        }

        debug!(
            "built grammar with {} rules rooted at '{}'",
            self.rules.len(),
            self.root
        );
        Ok(Grammar {
            root: self.root,
            rules: self.rules,
            index,
        })
    }
}
