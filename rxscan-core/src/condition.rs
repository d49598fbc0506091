//! Token predicates guarding state transitions
//!
//! A [`Condition`] is a pure test over one token. Conditions compose with
//! [`Condition::or`], [`Condition::and`] and [`Condition::negate`]; composite
//! conditions evaluate their operands left to right and short-circuit.

use crate::error::{ConfigurationError, Result};
use crate::token::{Token, TokenKind};
use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, OnceLock};

/// Match context handed to conditions alongside the token
#[derive(Debug, Clone, Copy, Default)]
pub struct Context<'a> {
    /// Previously fed token in the effective sequence
    pub previous: Option<&'a Token>,
    /// Tokens consumed since the machine last sat in a start state
    pub depth: usize,
}

/// A shared, immutable set of words
///
/// Case-insensitive sets store lowercase entries and lowercase the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSet {
    words: HashSet<String>,
    case_sensitive: bool,
}

impl WordSet {
    /// Build a set from any word iterator
    pub fn new<I, S>(words: I, case_sensitive: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| {
                if case_sensitive {
                    w.as_ref().to_string()
                } else {
                    w.as_ref().to_lowercase()
                }
            })
            .collect();
        Self {
            words,
            case_sensitive,
        }
    }

    /// Case-insensitive set, the common case for lexicon entries
    pub fn insensitive<I, S>(words: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Arc::new(Self::new(words, false))
    }

    /// Membership test honoring the case flag
    pub fn contains(&self, text: &str) -> bool {
        if self.case_sensitive {
            self.words.contains(text)
        } else {
            self.words.contains(&text.to_lowercase())
        }
    }

    /// Number of distinct entries
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set has no entries
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

type PredicateFn = dyn Fn(&Token, &Context<'_>) -> bool + Send + Sync;

/// A named closure for tests no built-in variant covers
#[derive(Clone)]
pub struct Predicate {
    name: String,
    test: Arc<PredicateFn>,
}

impl Predicate {
    /// Predicate name used in debug output
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Predicate").field(&self.name).finish()
    }
}

/// Predicate over a single token
#[derive(Debug, Clone)]
pub enum Condition {
    /// Always matches
    Any,
    /// Whole-text equality
    Text {
        /// Expected text
        value: String,
        /// Compare case-sensitively
        case_sensitive: bool,
    },
    /// Word token whose text is in the set
    WordSet(Arc<WordSet>),
    /// Token of any kind whose text is in the set
    TextSet(Arc<WordSet>),
    /// Leading number immediately followed by a set member, e.g. `10mg`
    ContainsSetText(Arc<WordSet>),
    /// Token of the given kind
    Kind(TokenKind),
    /// Any number token
    Number,
    /// Number token without a fractional part
    Integer,
    /// Number token with a fractional part
    Decimal,
    /// Integer token equal to the value
    IntegerValue(i64),
    /// Integer token within an inclusive range
    IntegerRange {
        /// Lower bound
        min: i64,
        /// Upper bound
        max: i64,
    },
    /// Single-token numeric range such as `1-2` or `0.5-1`
    Range,
    /// Punctuation token equal to the character
    Punctuation(char),
    /// Symbol token equal to the character
    Symbol(char),
    /// Override token produced by the named upstream match
    Labeled(String),
    /// Regular expression matched against the whole token text
    Pattern(Regex),
    /// Negation
    Not(Box<Condition>),
    /// Conjunction, left operand first
    And(Box<Condition>, Box<Condition>),
    /// Disjunction, left operand first
    Or(Box<Condition>, Box<Condition>),
    /// Caller-supplied closure
    Custom(Predicate),
}

impl Condition {
    /// Case-insensitive text equality
    pub fn text(value: impl Into<String>) -> Self {
        Condition::Text {
            value: value.into(),
            case_sensitive: false,
        }
    }

    /// Case-sensitive text equality
    pub fn text_exact(value: impl Into<String>) -> Self {
        Condition::Text {
            value: value.into(),
            case_sensitive: true,
        }
    }

    /// Word token in the set
    pub fn word_in(set: &Arc<WordSet>) -> Self {
        Condition::WordSet(Arc::clone(set))
    }

    /// Any token whose text is in the set
    pub fn text_in(set: &Arc<WordSet>) -> Self {
        Condition::TextSet(Arc::clone(set))
    }

    /// Override token carrying the label
    pub fn labeled(label: impl Into<String>) -> Self {
        Condition::Labeled(label.into())
    }

    /// Regex over the whole token text; the pattern is anchored on both ends
    pub fn pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .map_err(|e| ConfigurationError::InvalidPattern(e.to_string()))?;
        Ok(Condition::Pattern(regex))
    }

    /// Wrap a closure
    pub fn custom<F>(name: impl Into<String>, test: F) -> Self
    where
        F: Fn(&Token, &Context<'_>) -> bool + Send + Sync + 'static,
    {
        Condition::Custom(Predicate {
            name: name.into(),
            test: Arc::new(test),
        })
    }

    /// Disjunction with another condition
    pub fn or(self, other: Condition) -> Self {
        Condition::Or(Box::new(self), Box::new(other))
    }

    /// Conjunction with another condition
    pub fn and(self, other: Condition) -> Self {
        Condition::And(Box::new(self), Box::new(other))
    }

    /// Negation
    pub fn negate(self) -> Self {
        Condition::Not(Box::new(self))
    }

    /// Disjunction over many conditions; `None` for an empty iterator
    pub fn any_of<I>(conditions: I) -> Option<Self>
    where
        I: IntoIterator<Item = Condition>,
    {
        conditions.into_iter().reduce(Condition::or)
    }

    /// Evaluate against a token in context
    pub fn evaluate(&self, token: &Token, ctx: &Context<'_>) -> bool {
        match self {
            Condition::Any => true,
            Condition::Text {
                value,
                case_sensitive: true,
            } => token.text() == value,
            Condition::Text {
                value,
                case_sensitive: false,
            } => token.text().to_lowercase() == value.to_lowercase(),
            Condition::WordSet(set) => {
                token.kind() == TokenKind::Word && set.contains(token.text())
            }
            Condition::TextSet(set) => set.contains(token.text()),
            Condition::ContainsSetText(set) => contains_set_text(token.text(), set),
            Condition::Kind(kind) => token.kind() == *kind,
            Condition::Number => token.kind() == TokenKind::Number,
            Condition::Integer => token.integer().is_some(),
            Condition::Decimal => {
                token.kind() == TokenKind::Number && token.text().contains('.')
            }
            Condition::IntegerValue(value) => token.integer() == Some(*value),
            Condition::IntegerRange { min, max } => token
                .integer()
                .is_some_and(|v| (*min..=*max).contains(&v)),
            Condition::Range => range_regex().is_match(token.text()),
            Condition::Punctuation(c) => {
                token.is_punctuation() && single_char(token.text(), *c)
            }
            Condition::Symbol(c) => {
                token.kind() == TokenKind::Symbol && single_char(token.text(), *c)
            }
            Condition::Labeled(label) => token.label() == Some(label.as_str()),
            Condition::Pattern(regex) => regex.is_match(token.text()),
            Condition::Not(inner) => !inner.evaluate(token, ctx),
            Condition::And(left, right) => {
                left.evaluate(token, ctx) && right.evaluate(token, ctx)
            }
            Condition::Or(left, right) => {
                left.evaluate(token, ctx) || right.evaluate(token, ctx)
            }
            Condition::Custom(predicate) => (predicate.test)(token, ctx),
        }
    }

    /// Whether the condition matches every token
    ///
    /// Conservative: only structurally total conditions are recognized.
    pub fn is_total(&self) -> bool {
        match self {
            Condition::Any => true,
            Condition::Or(left, right) => left.is_total() || right.is_total(),
            Condition::And(left, right) => left.is_total() && right.is_total(),
            Condition::Not(inner) => inner.is_never(),
            _ => false,
        }
    }

    fn is_never(&self) -> bool {
        match self {
            Condition::Not(inner) => inner.is_total(),
            Condition::Or(left, right) => left.is_never() && right.is_never(),
            Condition::And(left, right) => left.is_never() || right.is_never(),
            _ => false,
        }
    }
}

fn single_char(text: &str, expected: char) -> bool {
    let mut chars = text.chars();
    chars.next() == Some(expected) && chars.next().is_none()
}

fn contains_set_text(text: &str, set: &WordSet) -> bool {
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(text.len());
    let (number, rest) = text.split_at(split);
    !number.is_empty()
        && number.starts_with(|c: char| c.is_ascii_digit())
        && !rest.is_empty()
        && set.contains(rest)
}

fn range_regex() -> &'static Regex {
    static RANGE: OnceLock<Regex> = OnceLock::new();
    RANGE.get_or_init(|| {
        Regex::new(r"^\d+(?:\.\d+)?-\d+(?:\.\d+)?$").expect("range pattern is valid")
    })
}
