//! Effective token sequence construction
//!
//! Splicing substitutes override tokens for the runs of original tokens they
//! cover. Every effective [`Step`] remembers which original tokens it stands
//! for, and the [`SkipTable`] records how many tokens each override
//! suppressed so match starts can be mapped back to original positions.
//!
//! When several override sets anchor at the same token only one governs:
//! the override reaching further wins, and on equal end offsets the set with
//! the higher index wins. Yielding sets record a delta of zero for the
//! anchor.

use crate::error::{ConfigurationError, CoreError, Result};
use crate::overrides::OverrideSet;
use crate::token::Token;
use smallvec::SmallVec;
use std::collections::BTreeMap;
use tracing::trace;

/// One entry of the effective sequence
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    /// Token fed to the machines
    pub token: &'a Token,
    /// Original index of the first token this step stands for
    pub position: usize,
    /// Number of original tokens this step stands for
    pub covered: usize,
    /// Override set that supplied the token
    pub source: Option<usize>,
}

impl Step<'_> {
    /// Original index of the last token this step stands for
    pub fn last(&self) -> usize {
        self.position + self.covered - 1
    }
}

/// Per-set skip deltas keyed by anchor offset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipTable {
    deltas: Vec<BTreeMap<usize, usize>>,
}

impl SkipTable {
    fn with_sets(sets: usize) -> Self {
        Self {
            deltas: vec![BTreeMap::new(); sets],
        }
    }

    fn record(&mut self, set: usize, anchor: usize, delta: usize) {
        if let Some(table) = self.deltas.get_mut(set) {
            table.insert(anchor, delta);
        }
    }

    /// Delta recorded by one set for an anchor
    pub fn delta(&self, set: usize, anchor: usize) -> Option<usize> {
        self.deltas.get(set)?.get(&anchor).copied()
    }

    /// Sum of all sets' deltas for an anchor
    pub fn total(&self, anchor: usize) -> usize {
        self.deltas
            .iter()
            .filter_map(|table| table.get(&anchor))
            .sum()
    }
}

/// The spliced view of one token sequence
#[derive(Debug, Clone)]
pub struct Splice<'a> {
    tokens: &'a [Token],
    steps: Vec<Step<'a>>,
    skips: SkipTable,
}

struct Suppression {
    set: usize,
    anchor: usize,
    end: usize,
    step: usize,
    skipped: usize,
}

impl<'a> Splice<'a> {
    /// Splice any number of override sets into the token sequence
    pub fn new(tokens: &'a [Token], overrides: &'a [OverrideSet]) -> Result<Self> {
        validate(tokens, overrides)?;

        let mut steps = Vec::with_capacity(tokens.len());
        let mut skips = SkipTable::with_sets(overrides.len());
        let mut active: Option<Suppression> = None;

        for (position, token) in tokens.iter().enumerate() {
            if let Some(current) = active.as_mut() {
                if token.start() < current.end {
                    current.skipped += 1;
                    continue;
                }
            }
            if let Some(done) = active.take() {
                close(done, &mut steps, &mut skips);
            }

            let anchor = token.start();
            let candidates: SmallVec<[(usize, &'a Token); 2]> = overrides
                .iter()
                .enumerate()
                .filter_map(|(set, o)| o.get(anchor).map(|t| (set, t)))
                .collect();

            let Some(&(winner, replacement)) =
                candidates.iter().max_by_key(|(set, t)| (t.end(), *set))
            else {
                steps.push(Step {
                    token,
                    position,
                    covered: 1,
                    source: None,
                });
                continue;
            };

            for &(set, _) in candidates.iter().filter(|(set, _)| *set != winner) {
                trace!(anchor, yielded = set, winner, "override yielded");
                skips.record(set, anchor, 0);
            }
            trace!(anchor, set = winner, end = replacement.end(), "override active");
            steps.push(Step {
                token: replacement,
                position,
                covered: 1,
                source: Some(winner),
            });
            active = Some(Suppression {
                set: winner,
                anchor,
                end: replacement.end(),
                step: steps.len() - 1,
                skipped: 0,
            });
        }
        if let Some(done) = active.take() {
            close(done, &mut steps, &mut skips);
        }

        Ok(Self {
            tokens,
            steps,
            skips,
        })
    }

    /// Original tokens
    pub fn tokens(&self) -> &'a [Token] {
        self.tokens
    }

    /// Effective sequence
    pub fn steps(&self) -> &[Step<'a>] {
        &self.steps
    }

    /// Skip deltas
    pub fn skips(&self) -> &SkipTable {
        &self.skips
    }
}

fn close(done: Suppression, steps: &mut [Step<'_>], skips: &mut SkipTable) {
    if let Some(step) = steps.get_mut(done.step) {
        step.covered = done.skipped + 1;
    }
    skips.record(done.set, done.anchor, done.skipped);
}

fn validate(tokens: &[Token], overrides: &[OverrideSet]) -> Result<()> {
    if let Some(index) = tokens
        .windows(2)
        .position(|pair| pair[1].start() < pair[0].end())
    {
        return Err(ConfigurationError::UnorderedTokens { index: index + 1 }.into());
    }

    for (set, overrides) in overrides.iter().enumerate() {
        for offset in overrides.anchors() {
            if tokens.binary_search_by_key(&offset, Token::start).is_err() {
                return Err(CoreError::from(ConfigurationError::UnanchoredOverride {
                    set,
                    offset,
                }));
            }
        }
    }
    Ok(())
}
