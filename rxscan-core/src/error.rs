//! Error types for machine construction and scanning

use thiserror::Error;

/// Errors raised by the scanning runtime
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A machine, override set or token sequence is malformed
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A resolved span boundary fell outside the token sequence
    #[error("bounds error: {0}")]
    Bounds(#[from] BoundsError),

    /// A token with an empty or inverted character range
    #[error("invalid token {text:?} at {start}..{end}")]
    InvalidToken {
        /// Token text as supplied
        text: String,
        /// Start character offset
        start: usize,
        /// End character offset
        end: usize,
    },
}

/// Construction-time and splice-time configuration failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A reachable state has no total fallback transition
    #[error("machine '{machine}': state '{state}' has no fallback transition")]
    MissingFallback {
        /// Machine name
        machine: String,
        /// State name
        state: String,
    },

    /// A transition points at a state id not present in the machine
    #[error("machine '{machine}': state '{state}' targets unknown state #{target}")]
    UnknownState {
        /// Machine name
        machine: String,
        /// Source state name
        state: String,
        /// Offending target index
        target: usize,
    },

    /// Input could not be consumed from the current state
    #[error("machine '{machine}': no transition from state '{state}'")]
    Stuck {
        /// Machine name
        machine: String,
        /// State name
        state: String,
    },

    /// An override token is anchored at an offset no original token starts at
    #[error("override set {set}: anchor {offset} does not match any token start")]
    UnanchoredOverride {
        /// Index of the override set
        set: usize,
        /// Anchor character offset
        offset: usize,
    },

    /// Two override tokens in one set share an anchor
    #[error("duplicate override anchor at offset {offset}")]
    DuplicateAnchor {
        /// Anchor character offset
        offset: usize,
    },

    /// A span handed to an override set covers no token
    #[error("span {start}..{end} covers no token")]
    EmptyOverride {
        /// Span start offset
        start: usize,
        /// Span end offset
        end: usize,
    },

    /// Tokens are not in ascending offset order
    #[error("token {index} starts before the end of its predecessor")]
    UnorderedTokens {
        /// Index of the first out-of-order token
        index: usize,
    },

    /// A regular expression condition failed to compile
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),
}

/// Span boundary resolution failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoundsError {
    /// The boundary would precede the first token
    #[error("machine '{machine}': end boundary precedes token 0 at position {position}")]
    BeforeFirstToken {
        /// Machine name
        machine: String,
        /// Position of the token that completed the match
        position: usize,
    },

    /// The boundary would lie past the last token
    #[error("machine '{machine}': token index {index} out of range for {len} tokens")]
    PastLastToken {
        /// Machine name
        machine: String,
        /// Computed token index
        index: usize,
        /// Number of tokens in the sequence
        len: usize,
    },

    /// The start boundary lies after the end boundary
    #[error("machine '{machine}': start token {first} is after end token {last}")]
    Inverted {
        /// Machine name
        machine: String,
        /// Computed start token index
        first: usize,
        /// Computed end token index
        last: usize,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
