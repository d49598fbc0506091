//! Plain-text tokenizer producing character-offset tokens

use anyhow::{Context, Result};
use regex::Regex;
use rxscan_core::Token;

/// Alternatives are tried in order at each position
const TOKEN_PATTERN: &str = r"(?x)
    \r?\n
  | [A-Za-z](?:\.[A-Za-z])+\.?                         # p.o. q.i.d. b.i.d
  | \d+(?:\.\d+)?-\d+[\p{L}][\p{L}\p{N}]*              # 2-4h
  | \d+(?:\.\d+)?-\d+(?:\.\d+)?                        # 1-2 0.5-1
  | \p{N}*\p{L}[\p{L}\p{N}]*(?:-[\p{L}\p{N}]+)+        # one-half g-tube q4-6h
  | \p{N}*\p{L}[\p{L}\p{N}]*                           # tablets 10mg q6h
  | \d+(?:,\d{3})*(?:\.\d+)?                           # 250 1,000 0.5
  | \S
";

/// Regex tokenizer for medication text
///
/// Numbers, words and punctuation become separate tokens, so `250-mg` yields
/// `250`, `-`, `mg`. Dotted abbreviations, numeric ranges and hyphenated
/// words stay whole. Line breaks are kept as tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    /// Compile the token pattern
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(TOKEN_PATTERN).context("Failed to compile token pattern")?;
        Ok(Self { pattern })
    }

    /// Split text into tokens with character offsets
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut byte_cursor = 0;
        let mut char_cursor = 0;

        for found in self.pattern.find_iter(text) {
            char_cursor += text[byte_cursor..found.start()].chars().count();
            let start = char_cursor;
            let end = start + found.as_str().chars().count();
            tokens.push(Token::new(found.as_str(), start, end)?);
            char_cursor = end;
            byte_cursor = found.end();
        }

        log::trace!("Tokenized {} chars into {} tokens", char_cursor, tokens.len());
        Ok(tokens)
    }
}
