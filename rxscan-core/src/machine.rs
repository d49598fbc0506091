//! Finite-state machines over token streams
//!
//! A [`Machine`] owns an arena of [`State`]s and a cursor. Machines are built
//! once through [`MachineBuilder`], validated for totality, and then reused
//! across any number of scans.

use crate::condition::{Condition, Context};
use crate::error::{ConfigurationError, Result};
use crate::state::{State, StateFlags, StateId};
use crate::token::Token;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// One automaton with a movable current-state cursor
#[derive(Debug, Clone)]
pub struct Machine {
    name: String,
    states: Vec<State>,
    start: StateId,
    current: StateId,
    depth: usize,
}

impl Machine {
    /// Start assembling a machine
    pub fn builder(name: impl Into<String>) -> MachineBuilder {
        MachineBuilder::new(name)
    }

    /// Machine name used in logs and errors
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Start state id
    pub fn start(&self) -> StateId {
        self.start
    }

    /// Current state id
    pub fn current(&self) -> StateId {
        self.current
    }

    /// Current state
    pub fn current_state(&self) -> &State {
        &self.states[self.current.0]
    }

    /// Look up a state by id
    pub fn state(&self, id: StateId) -> Option<&State> {
        self.states.get(id.0)
    }

    /// Number of states in the arena
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the arena is empty; never true for a built machine
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Whether the cursor sits on the start state
    pub fn is_at_start(&self) -> bool {
        self.current == self.start
    }

    /// Feed one token without context and return the new state's flags
    pub fn input(&mut self, token: &Token) -> Result<StateFlags> {
        self.input_after(token, None)
    }

    /// Feed one token, exposing the preceding token to conditions
    pub fn input_after(&mut self, token: &Token, previous: Option<&Token>) -> Result<StateFlags> {
        let ctx = Context {
            previous,
            depth: self.depth,
        };
        let state = &self.states[self.current.0];
        let next = state
            .transition(token, &ctx)
            .ok_or_else(|| ConfigurationError::Stuck {
                machine: self.name.clone(),
                state: state.name().to_string(),
            })?;

        self.current = next;
        let flags = self.states[next.0].flags();
        self.depth = if flags.start { 0 } else { self.depth + 1 };
        Ok(flags)
    }

    /// Return the cursor to the start state
    pub fn reset(&mut self) {
        self.current = self.start;
        self.depth = 0;
    }
}

/// Arena builder for [`Machine`]
#[derive(Debug)]
pub struct MachineBuilder {
    name: String,
    states: Vec<State>,
    invalid: Option<ConfigurationError>,
}

impl MachineBuilder {
    /// Empty builder
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: Vec::new(),
            invalid: None,
        }
    }

    /// Add a state and return its id
    pub fn state(&mut self, state: State) -> StateId {
        self.states.push(state);
        StateId(self.states.len() - 1)
    }

    /// Append a transition to `from`; order of calls is evaluation order
    pub fn transition(&mut self, from: StateId, condition: Condition, to: StateId) -> &mut Self {
        match self.states.get_mut(from.0) {
            Some(state) => state.push(condition, to),
            None if self.invalid.is_none() => {
                self.invalid = Some(ConfigurationError::UnknownState {
                    machine: self.name.clone(),
                    state: format!("#{}", from.0),
                    target: from.0,
                });
            }
            None => {}
        }
        self
    }

    /// Append a total fallback transition to `from`
    pub fn fallback(&mut self, from: StateId, to: StateId) -> &mut Self {
        self.transition(from, Condition::Any, to)
    }

    /// Validate and produce the machine; `start` gains the start flag
    pub fn build(mut self, start: StateId) -> Result<Machine> {
        if let Some(err) = self.invalid.take() {
            return Err(err.into());
        }
        if start.0 >= self.states.len() {
            return Err(ConfigurationError::UnknownState {
                machine: self.name,
                state: "<start>".to_string(),
                target: start.0,
            }
            .into());
        }

        for state in &self.states {
            if let Some(t) = state
                .transitions()
                .iter()
                .find(|t| t.target.0 >= self.states.len())
            {
                return Err(ConfigurationError::UnknownState {
                    machine: self.name.clone(),
                    state: state.name().to_string(),
                    target: t.target.0,
                }
                .into());
            }
        }

        let reachable = self.reachable_from(start);
        for (index, state) in self.states.iter().enumerate() {
            if !reachable[index] {
                debug!(machine = %self.name, state = state.name(), "unreachable state");
                continue;
            }
            let Some(fallback) = state.fallback_index() else {
                return Err(ConfigurationError::MissingFallback {
                    machine: self.name.clone(),
                    state: state.name().to_string(),
                }
                .into());
            };
            let dead = state.transitions().len() - fallback - 1;
            if dead > 0 {
                warn!(
                    machine = %self.name,
                    state = state.name(),
                    dead,
                    "transitions after fallback are never taken"
                );
            }
        }

        self.states[start.0].set_start();
        Ok(Machine {
            name: self.name,
            states: self.states,
            start,
            current: start,
            depth: 0,
        })
    }

    fn reachable_from(&self, start: StateId) -> Vec<bool> {
        let mut seen = vec![false; self.states.len()];
        let mut queue = VecDeque::from([start]);
        seen[start.0] = true;
        while let Some(id) = queue.pop_front() {
            for t in self.states[id.0].transitions() {
                if !seen[t.target.0] {
                    seen[t.target.0] = true;
                    queue.push_back(t.target);
                }
            }
        }
        seen
    }
}
