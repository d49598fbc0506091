//! File reading utilities

use crate::error::CliError;
use anyhow::{Context, Result};
use rxscan_core::Token;
use std::fs;
use std::path::Path;

/// Reads input documents from disk
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read a JSON array of pre-tokenized input
    ///
    /// Each element is an object with `text`, `start`, `end` and an optional
    /// `label`. Tokens are validated on decode.
    pub fn read_tokens(path: &Path) -> Result<Vec<Token>> {
        let content = Self::read_text(path)?;
        let tokens: Vec<Token> = serde_json::from_str(&content).map_err(|e| {
            CliError::InvalidTokens(format!("{}: {e}", path.display()))
        })?;

        Ok(tokens)
    }
}
