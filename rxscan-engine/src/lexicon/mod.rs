//! Word lists that parametrize the attribute machines
//!
//! Lexicons are TOML documents. One is embedded in the crate; others can be
//! loaded from disk and are validated the same way.

mod loader;
mod types;

pub use loader::{embedded_lexicon, load_lexicon_file, parse_lexicon};
pub use types::*;

use crate::attribute::ChangeStatus;
use crate::error::{EngineError, Result};
use rxscan_core::WordSet;
use std::path::Path;
use std::sync::Arc;

impl Lexicon {
    /// The built-in clinical lexicon
    pub fn embedded() -> &'static Lexicon {
        embedded_lexicon()
    }

    /// Load from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_lexicon_file(path.as_ref())
    }

    /// Parse from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self> {
        parse_lexicon(content, "inline")
    }

    /// Check structural rules the machines rely on
    pub fn validate(&self) -> Result<()> {
        if self.metadata.code.trim().is_empty() {
            return Err(invalid("metadata.code must not be empty"));
        }

        let required: [(&str, &[String]); 9] = [
            ("numbers.words", &self.numbers.words),
            ("strength.units", &self.strength.units),
            ("form.words", &self.form.words),
            ("frequency_unit.prefixes", &self.frequency_unit.prefixes),
            ("frequency_unit.hour_suffixes", &self.frequency_unit.hour_suffixes),
            ("frequency.counts", &self.frequency.counts),
            ("frequency.connectors", &self.frequency.connectors),
            ("duration.prefixes", &self.duration.prefixes),
            ("duration.periods", &self.duration.periods),
        ];
        for (section, words) in required {
            if words.is_empty() {
                return Err(invalid(format!("{section} must not be empty")));
            }
            check_words(section, words)?;
        }

        for (name, words) in self.unit_categories() {
            check_words(&format!("frequency_unit.{name}.single"), &words.single)?;
            check_words(&format!("frequency_unit.{name}.suffix"), &words.suffix)?;
            if words.phrases.iter().any(|p| p.split_whitespace().next().is_none()) {
                return Err(invalid(format!("frequency_unit.{name}: empty phrase")));
            }
        }
        self.hour_intervals()?;

        for (status, words) in self.status_categories() {
            let section = format!("change_status.{}", status.lexicon_key());
            check_words(&section, &words.single)?;
            check_words(&section, &words.first)?;
            check_words(&section, &words.second)?;
            if words.first.is_empty() != words.second.is_empty() {
                return Err(invalid(format!(
                    "{section}: first and second must be given together"
                )));
            }
            if let Some(word) = words
                .single
                .iter()
                .find(|w| words.first.iter().any(|f| f.eq_ignore_ascii_case(w)))
            {
                return Err(invalid(format!(
                    "{section}: '{word}' is both a single and a first word"
                )));
            }
        }

        Ok(())
    }

    /// Parsed `[frequency_unit.hours]` table, ascending by interval
    pub fn hour_intervals(&self) -> Result<Vec<(u8, &[String])>> {
        let mut intervals = self
            .frequency_unit
            .hours
            .iter()
            .map(|(key, words)| {
                let hours: u8 = key
                    .parse()
                    .ok()
                    .filter(|h| (1..=24).contains(h))
                    .ok_or_else(|| {
                        invalid(format!("frequency_unit.hours: '{key}' is not 1..=24"))
                    })?;
                Ok((hours, words.as_slice()))
            })
            .collect::<Result<Vec<_>>>()?;
        intervals.sort_by_key(|(hours, _)| *hours);
        Ok(intervals)
    }

    pub(crate) fn unit_categories(&self) -> [(&'static str, &UnitWords); 11] {
        let f = &self.frequency_unit;
        [
            ("one", &f.one),
            ("two", &f.two),
            ("three", &f.three),
            ("four", &f.four),
            ("five", &f.five),
            ("six", &f.six),
            ("every_other_day", &f.every_other_day),
            ("weekly", &f.weekly),
            ("monthly", &f.monthly),
            ("yearly", &f.yearly),
            ("as_needed", &f.as_needed),
        ]
    }

    pub(crate) fn status_categories(&self) -> [(ChangeStatus, &StatusWords); 10] {
        let c = &self.change_status;
        [
            (ChangeStatus::Start, &c.start),
            (ChangeStatus::Stop, &c.stop),
            (ChangeStatus::Increase, &c.increase),
            (ChangeStatus::Decrease, &c.decrease),
            (ChangeStatus::IncreaseFrom, &c.increase_from),
            (ChangeStatus::DecreaseFrom, &c.decrease_from),
            (ChangeStatus::NoChange, &c.no_change),
            (ChangeStatus::Other, &c.change),
            (ChangeStatus::Sum, &c.sum),
            (ChangeStatus::Max, &c.max),
        ]
    }
}

/// Case-insensitive shared word set
pub(crate) fn word_set(words: &[String]) -> Arc<WordSet> {
    WordSet::insensitive(words)
}

fn check_words(section: &str, words: &[String]) -> Result<()> {
    match words.iter().find(|w| w.trim().is_empty() || w.contains(char::is_whitespace)) {
        Some(word) => Err(invalid(format!(
            "{section}: '{word}' must be a single non-empty word"
        ))),
        None => Ok(()),
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::Lexicon(message.into())
}
