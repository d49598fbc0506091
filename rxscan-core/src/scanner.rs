//! Multi-machine token scanning
//!
//! The scanner feeds every effective token to every machine. A machine
//! entering a start state records the current original position; a machine
//! entering an end state completes a match whose boundaries are resolved as
//! follows:
//!
//! * start: one past the recorded position, after adding the skip delta of
//!   the override anchored there. With no recorded position the match starts
//!   at token 0. Indent-start end states move the start one further token.
//! * end: the last original token covered by the current step, or for
//!   non-terminal end states the original token before the current step,
//!   backing up one more when that token is punctuation.
//!
//! Spans are returned sorted and de-duplicated, so the result does not
//! depend on the order machines were registered in.

use crate::error::{BoundsError, Result};
use crate::machine::Machine;
use crate::overrides::OverrideSet;
use crate::span::Span;
use crate::splicer::{Splice, Step};
use crate::state::StateFlags;
use crate::token::Token;
use tracing::{debug, trace};

#[derive(Debug, Clone)]
struct Entry<T> {
    machine: Machine,
    tag: Option<T>,
}

/// A set of machines run together over one token sequence at a time
#[derive(Debug, Clone)]
pub struct Scanner<T> {
    entries: Vec<Entry<T>>,
}

impl<T> Default for Scanner<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Clone + Ord> Scanner<T> {
    /// Scanner without machines
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a machine and the tag its spans carry
    pub fn push(&mut self, machine: Machine, tag: Option<T>) {
        self.entries.push(Entry { machine, tag });
    }

    /// Builder-style [`Scanner::push`]
    pub fn with_machine(mut self, machine: Machine, tag: Option<T>) -> Self {
        self.push(machine, tag);
        self
    }

    /// Number of registered machines
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no machines are registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered machines in registration order
    pub fn machines(&self) -> impl Iterator<Item = &Machine> {
        self.entries.iter().map(|e| &e.machine)
    }

    /// Scan plain tokens
    pub fn scan(&mut self, tokens: &[Token]) -> Result<Vec<Span<T>>> {
        self.scan_with(tokens, &[])
    }

    /// Scan tokens with override sets spliced in
    pub fn scan_with(
        &mut self,
        tokens: &[Token],
        overrides: &[OverrideSet],
    ) -> Result<Vec<Span<T>>> {
        for entry in &mut self.entries {
            entry.machine.reset();
        }

        let splice = Splice::new(tokens, overrides)?;
        let result = self.run(&splice);

        for entry in &mut self.entries {
            entry.machine.reset();
        }

        let mut spans = result?;
        spans.sort();
        spans.dedup();
        debug!(
            machines = self.entries.len(),
            tokens = tokens.len(),
            steps = splice.steps().len(),
            spans = spans.len(),
            "scan complete"
        );
        Ok(spans)
    }

    fn run(&mut self, splice: &Splice<'_>) -> Result<Vec<Span<T>>> {
        let mut starts: Vec<Option<usize>> = vec![None; self.entries.len()];
        let mut spans = Vec::new();
        let mut previous: Option<&Token> = None;

        for step in splice.steps() {
            for (id, entry) in self.entries.iter_mut().enumerate() {
                let flags = entry.machine.input_after(step.token, previous)?;
                if flags.end {
                    let span = resolve(splice, step, starts[id], flags, entry)?;
                    trace!(
                        machine = entry.machine.name(),
                        start = span.start,
                        end = span.end,
                        "match"
                    );
                    spans.push(span);
                    entry.machine.reset();
                    starts[id] = Some(step.position);
                } else if flags.start {
                    starts[id] = Some(step.position);
                }
            }
            previous = Some(step.token);
        }
        Ok(spans)
    }
}

fn resolve<T: Clone>(
    splice: &Splice<'_>,
    step: &Step<'_>,
    recorded: Option<usize>,
    flags: StateFlags,
    entry: &Entry<T>,
) -> Result<Span<T>> {
    let tokens = splice.tokens();
    let machine = entry.machine.name();
    let past = |index: usize| BoundsError::PastLastToken {
        machine: machine.to_string(),
        index,
        len: tokens.len(),
    };
    let before = |position: usize| {
        position
            .checked_sub(1)
            .ok_or_else(|| BoundsError::BeforeFirstToken {
                machine: machine.to_string(),
                position: step.position,
            })
    };

    let mut first = match recorded {
        None => 0,
        Some(position) => {
            let anchor = tokens.get(position).ok_or_else(|| past(position))?.start();
            position + splice.skips().total(anchor) + 1
        }
    };
    if flags.indent_start {
        first += 1;
    }

    let last = if flags.non_terminal_end {
        let previous = before(step.position)?;
        if tokens[previous].is_punctuation() {
            before(previous)?
        } else {
            previous
        }
    } else {
        step.last()
    };

    let first_token = tokens.get(first).ok_or_else(|| past(first))?;
    let last_token = tokens.get(last).ok_or_else(|| past(last))?;
    if first > last {
        return Err(BoundsError::Inverted {
            machine: machine.to_string(),
            first,
            last,
        }
        .into());
    }

    Ok(Span::new(
        first_token.start(),
        last_token.end(),
        entry.tag.clone(),
    ))
}
