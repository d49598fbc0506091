//! Override sets: upstream matches treated as atomic tokens

use crate::error::{ConfigurationError, Result};
use crate::span::Span;
use crate::token::Token;
use std::collections::btree_map::{self, BTreeMap};

/// Override tokens keyed by the start offset of the first original token
/// they cover (the anchor)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideSet {
    by_anchor: BTreeMap<usize, Token>,
}

impl OverrideSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an override token anchored at its own start offset
    pub fn insert(&mut self, token: Token) -> Result<()> {
        match self.by_anchor.entry(token.start()) {
            btree_map::Entry::Occupied(_) => Err(ConfigurationError::DuplicateAnchor {
                offset: token.start(),
            }
            .into()),
            btree_map::Entry::Vacant(slot) => {
                slot.insert(token);
                Ok(())
            }
        }
    }

    /// Build from override tokens, rejecting duplicate anchors
    pub fn from_tokens<I>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut set = Self::new();
        for token in tokens {
            set.insert(token)?;
        }
        Ok(set)
    }

    /// Build from the spans of an earlier scan over the same tokens
    ///
    /// Each span becomes one token labeled `label` whose text joins the
    /// covered tokens. Spans sharing a start offset collapse to the widest.
    pub fn from_spans<T>(tokens: &[Token], spans: &[Span<T>], label: &str) -> Result<Self> {
        let mut widest: BTreeMap<usize, usize> = BTreeMap::new();
        for span in spans {
            let end = widest.entry(span.start).or_insert(span.end);
            *end = (*end).max(span.end);
        }

        let mut set = Self::new();
        for (start, end) in widest {
            let text = covered_text(tokens, start, end)
                .ok_or(ConfigurationError::EmptyOverride { start, end })?;
            set.insert(Token::labeled(text, start, end, label)?)?;
        }
        Ok(set)
    }

    /// Override anchored at `offset`
    pub fn get(&self, offset: usize) -> Option<&Token> {
        self.by_anchor.get(&offset)
    }

    /// Anchors in ascending order
    pub fn anchors(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_anchor.keys().copied()
    }

    /// Override tokens in anchor order
    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.by_anchor.values()
    }

    /// Number of override tokens
    pub fn len(&self) -> usize {
        self.by_anchor.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.by_anchor.is_empty()
    }
}

fn covered_text(tokens: &[Token], start: usize, end: usize) -> Option<String> {
    let mut text = String::new();
    let mut last_end: Option<usize> = None;
    for token in tokens
        .iter()
        .filter(|t| t.start() >= start && t.end() <= end)
    {
        if last_end.is_some_and(|e| e < token.start()) {
            text.push(' ');
        }
        text.push_str(token.text());
        last_end = Some(token.end());
    }
    (!text.is_empty()).then_some(text)
}
