//! Character classes for the single-character primitive
//!
//! A class is either an inclusive range, an explicit set, or a bracket
//! expression in regex syntax (`a-z`, `0-9_`, `^ \t`). Bracket expressions are
//! compiled once per distinct pattern and shared through a process-wide cache.

use crate::error::GrammarError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

static PATTERN_CACHE: Lazy<Mutex<HashMap<String, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Compile `^[pattern]$`, reusing an earlier compilation of the same pattern
fn compile_pattern(pattern: &str) -> Result<Regex, GrammarError> {
    let invalid = |message: String| GrammarError::InvalidCharClass {
        pattern: pattern.to_string(),
        message,
    };

    let mut cache = PATTERN_CACHE
        .lock()
        .map_err(|_| invalid("pattern cache is poisoned".to_string()))?;
    if let Some(regex) = cache.get(pattern) {
        return Ok(regex.clone());
    }

    if closes_bracket_early(pattern) {
        return Err(invalid("unescaped ']' ends the class early".to_string()));
    }
    let regex = Regex::new(&format!("^[{}]$", pattern)).map_err(|e| invalid(e.to_string()))?;
    cache.insert(pattern.to_string(), regex.clone());
    Ok(regex)
}

/// True if an unescaped `]` would close the outer bracket before the end.
///
/// A `]` right after the opening bracket (or after a leading `^`) is literal;
/// nested classes such as `[:alpha:]` or `a-z[0-9]` keep their own brackets.
fn closes_bracket_early(pattern: &str) -> bool {
    let body = pattern.strip_prefix('^').unwrap_or(pattern);
    let mut depth = 0usize;
    let mut escaped = false;
    for (i, c) in body.char_indices() {
        match c {
            _ if escaped => escaped = false,
            '\\' => escaped = true,
            '[' => depth += 1,
            ']' if i == 0 => {}
            ']' if depth == 0 => return true,
            ']' => depth -= 1,
            _ => {}
        }
    }
    false
}

/// A predicate over single characters
#[derive(Debug, Clone)]
pub enum CharClass {
    /// Every character from `start` to `end`, inclusive
    Range { start: char, end: char },
    /// Exactly the listed characters
    Set(Vec<char>),
    /// A regex bracket expression, stored without the brackets
    Pattern { source: String, regex: Regex },
}

impl CharClass {
    pub fn range(start: char, end: char) -> Self {
        CharClass::Range { start, end }
    }

    pub fn one_of(chars: &str) -> Self {
        CharClass::Set(chars.chars().collect())
    }

    /// Build a class from the body of a regex bracket expression.
    ///
    /// `pattern("a-z")` behaves like `[a-z]`; a leading `^` negates.
    pub fn pattern(pattern: &str) -> Result<Self, GrammarError> {
        let regex = compile_pattern(pattern)?;
        Ok(CharClass::Pattern {
            source: pattern.to_string(),
            regex,
        })
    }

    pub fn matches(&self, c: char) -> bool {
        match self {
            CharClass::Range { start, end } => (*start..=*end).contains(&c),
            CharClass::Set(chars) => chars.contains(&c),
            CharClass::Pattern { regex, .. } => {
                let mut buf = [0u8; 4];
                regex.is_match(c.encode_utf8(&mut buf))
            }
        }
    }
}

impl FromStr for CharClass {
    type Err = GrammarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CharClass::pattern(s)
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClass::Range { start, end } => write!(f, "[{}-{}]", start, end),
            CharClass::Set(chars) => {
                f.write_str("[")?;
                for c in chars {
                    if matches!(c, ']' | '\\' | '^' | '-') {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str("]")
            }
            CharClass::Pattern { source, .. } => write!(f, "[{}]", source),
        }
    }
}
