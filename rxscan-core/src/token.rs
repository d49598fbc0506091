//! Character-offset addressed tokens

use crate::error::{CoreError, Result};

/// Characters classified as punctuation tokens
const PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', '-', '(', ')', '[', ']', '{', '}', '\'', '"', '/', '\u{2013}',
    '\u{2014}',
];

/// Coarse token class derived from the token text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TokenKind {
    /// Alphabetic or mixed alphanumeric text
    Word,
    /// Integer or decimal number, optionally with thousands separators
    Number,
    /// Punctuation marks only
    Punctuation,
    /// Non-alphanumeric symbols such as `%` or `+`
    Symbol,
    /// Line breaks
    Newline,
}

/// An immutable unit of text addressed by character offsets
///
/// Offsets are half-open: `start` is inclusive and `end` exclusive. Tokens
/// produced from an upstream match carry a label naming that match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawToken"))]
pub struct Token {
    text: String,
    start: usize,
    end: usize,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    label: Option<String>,
}

impl Token {
    /// Create a token, rejecting empty text or an empty offset range
    pub fn new(text: impl Into<String>, start: usize, end: usize) -> Result<Self> {
        let text = text.into();
        if text.is_empty() || start >= end {
            return Err(CoreError::InvalidToken { text, start, end });
        }
        Ok(Self {
            text,
            start,
            end,
            label: None,
        })
    }

    /// Create a token carrying the label of the match that produced it
    pub fn labeled(
        text: impl Into<String>,
        start: usize,
        end: usize,
        label: impl Into<String>,
    ) -> Result<Self> {
        let mut token = Self::new(text, start, end)?;
        token.label = Some(label.into());
        Ok(token)
    }

    /// Token text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Inclusive start offset
    pub fn start(&self) -> usize {
        self.start
    }

    /// Exclusive end offset
    pub fn end(&self) -> usize {
        self.end
    }

    /// Label of the upstream match, if this is an override token
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Token class derived from the text
    pub fn kind(&self) -> TokenKind {
        classify(&self.text)
    }

    /// Whether the token consists of punctuation only
    pub fn is_punctuation(&self) -> bool {
        self.kind() == TokenKind::Punctuation
    }

    /// Numeric value of a number token
    pub fn number(&self) -> Option<f64> {
        parse_number(&self.text)
    }

    /// Integer value of a number token without a fractional part
    pub fn integer(&self) -> Option<i64> {
        if self.text.contains('.') {
            return None;
        }
        parse_number(&self.text)?;
        self.text.replace(',', "").parse().ok()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawToken {
    text: String,
    start: usize,
    end: usize,
    #[serde(default)]
    label: Option<String>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawToken> for Token {
    type Error = CoreError;

    fn try_from(raw: RawToken) -> Result<Self> {
        match raw.label {
            Some(label) => Token::labeled(raw.text, raw.start, raw.end, label),
            None => Token::new(raw.text, raw.start, raw.end),
        }
    }
}

/// Whether a character counts as punctuation
pub fn is_punctuation_char(c: char) -> bool {
    PUNCTUATION.contains(&c)
}

fn classify(text: &str) -> TokenKind {
    if text.chars().all(|c| c == '\n' || c == '\r') {
        TokenKind::Newline
    } else if parse_number(text).is_some() {
        TokenKind::Number
    } else if text.chars().all(is_punctuation_char) {
        TokenKind::Punctuation
    } else if text.chars().all(|c| !c.is_alphanumeric() && !c.is_whitespace()) {
        TokenKind::Symbol
    } else {
        TokenKind::Word
    }
}

/// Parse `123`, `1,000`, `0.5` style numbers
fn parse_number(text: &str) -> Option<f64> {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text, None),
    };

    let groups: Vec<&str> = int_part.split(',').collect();
    let leading_ok = groups
        .first()
        .is_some_and(|g| !g.is_empty() && g.chars().all(|c| c.is_ascii_digit()));
    let rest_ok = groups[1..]
        .iter()
        .all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()));
    if !leading_ok || !rest_ok {
        return None;
    }
    if let Some(frac) = frac_part {
        if frac.is_empty() || !frac.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
    }

    text.replace(',', "").parse().ok()
}
