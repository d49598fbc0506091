//! Match results in original character offsets

use crate::token::Token;

/// A completed match
///
/// Offsets always refer to the original token list, never to override
/// tokens fed during splicing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span<T> {
    /// Inclusive start offset
    pub start: usize,
    /// Exclusive end offset
    pub end: usize,
    /// Category tag of the machine that produced the match
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub category: Option<T>,
}

impl<T> Span<T> {
    /// Span with a category
    pub fn new(start: usize, end: usize, category: Option<T>) -> Self {
        Self {
            start,
            end,
            category,
        }
    }

    /// Length in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span is empty
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether the token lies entirely inside the span
    pub fn covers(&self, token: &Token) -> bool {
        token.start() >= self.start && token.end() <= self.end
    }

    /// Slice the matched text out of the source document
    pub fn text<'a>(&self, source: &'a str) -> Option<&'a str> {
        let begin = source.char_indices().nth(self.start).map(|(i, _)| i)?;
        let finish = source
            .char_indices()
            .nth(self.end)
            .map(|(i, _)| i)
            .unwrap_or(source.len());
        (self.end <= source.chars().count()).then(|| &source[begin..finish])
    }

    /// Replace the category
    pub fn map_category<U, F>(self, f: F) -> Span<U>
    where
        F: FnOnce(T) -> U,
    {
        Span {
            start: self.start,
            end: self.end,
            category: self.category.map(f),
        }
    }
}
