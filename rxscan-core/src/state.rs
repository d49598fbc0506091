//! Automaton states and their transition tables

use crate::condition::{Condition, Context};
use crate::token::Token;
use smallvec::SmallVec;

/// Index of a state inside its machine's arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateId(pub(crate) usize);

impl StateId {
    /// Arena index
    pub fn index(self) -> usize {
        self.0
    }
}

/// Flags reported to the scanner after each transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StateFlags {
    /// Entering this state records a match start
    pub start: bool,
    /// Entering this state completes a match
    pub end: bool,
    /// The completing token is not part of the match
    pub non_terminal_end: bool,
    /// The match begins one token after the recorded start
    pub indent_start: bool,
}

/// A guarded edge to another state
#[derive(Debug, Clone)]
pub struct Transition {
    /// Guard evaluated against the incoming token
    pub condition: Condition,
    /// Destination state
    pub target: StateId,
}

/// A named automaton node with an ordered transition table
#[derive(Debug, Clone)]
pub struct State {
    name: String,
    transitions: SmallVec<[Transition; 4]>,
    flags: StateFlags,
}

impl State {
    /// Plain intermediate state
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transitions: SmallVec::new(),
            flags: StateFlags::default(),
        }
    }

    /// End state whose completing token belongs to the match
    pub fn end(name: impl Into<String>) -> Self {
        Self::new(name).with_flags(StateFlags {
            end: true,
            ..StateFlags::default()
        })
    }

    /// End state reached on the token after the match
    pub fn non_terminal_end(name: impl Into<String>) -> Self {
        Self::new(name).with_flags(StateFlags {
            end: true,
            non_terminal_end: true,
            ..StateFlags::default()
        })
    }

    /// End state whose match skips the first consumed token
    pub fn indent_start(name: impl Into<String>) -> Self {
        Self::new(name).with_flags(StateFlags {
            end: true,
            indent_start: true,
            ..StateFlags::default()
        })
    }

    /// Replace the flags
    pub fn with_flags(mut self, flags: StateFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Mark as a start state in addition to existing flags
    pub fn as_start(mut self) -> Self {
        self.flags.start = true;
        self
    }

    /// State name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current flags
    pub fn flags(&self) -> StateFlags {
        self.flags
    }

    /// Transitions in declaration order
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub(crate) fn push(&mut self, condition: Condition, target: StateId) {
        self.transitions.push(Transition { condition, target });
    }

    pub(crate) fn set_start(&mut self) {
        self.flags.start = true;
    }

    /// Destination of the first transition whose guard accepts the token
    pub fn transition(&self, token: &Token, ctx: &Context<'_>) -> Option<StateId> {
        self.transitions
            .iter()
            .find(|t| t.condition.evaluate(token, ctx))
            .map(|t| t.target)
    }

    /// Index of the first total transition, if any
    pub fn fallback_index(&self) -> Option<usize> {
        self.transitions.iter().position(|t| t.condition.is_total())
    }
}
