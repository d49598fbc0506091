//! Finite-state token scanning runtime
//!
//! `rxscan-core` provides hand-built automata over pre-tokenized text:
//!
//! * [`Condition`]: predicates over a single token
//! * [`State`] and [`Machine`]: total automata assembled with [`MachineBuilder`]
//! * [`Scanner`]: runs many machines over one token sequence and emits [`Span`]s
//! * [`OverrideSet`] and [`Splice`]: treat spans found by earlier scans as
//!   single atomic tokens while keeping output offsets in the original text
//!
//! ```
//! use rxscan_core::{Condition, Machine, Scanner, State, Token};
//!
//! let mut b = Machine::builder("percent");
//! let start = b.state(State::new("start"));
//! let num = b.state(State::new("num"));
//! let end = b.state(State::end("end"));
//! b.transition(start, Condition::Number, num)
//!     .fallback(start, start)
//!     .transition(num, Condition::Symbol('%'), end)
//!     .fallback(num, start)
//!     .fallback(end, start);
//! let machine = b.build(start).unwrap();
//!
//! let tokens = vec![
//!     Token::new("5", 0, 1).unwrap(),
//!     Token::new("%", 1, 2).unwrap(),
//! ];
//! let mut scanner = Scanner::new().with_machine(machine, Some("percent"));
//! let spans = scanner.scan(&tokens).unwrap();
//! assert_eq!((spans[0].start, spans[0].end), (0, 2));
//! ```

#![warn(missing_docs)]

pub mod condition;
pub mod error;
pub mod machine;
pub mod overrides;
pub mod scanner;
pub mod span;
pub mod splicer;
pub mod state;
pub mod token;

pub use condition::{Condition, Context, Predicate, WordSet};
pub use error::{BoundsError, ConfigurationError, CoreError, Result};
pub use machine::{Machine, MachineBuilder};
pub use overrides::OverrideSet;
pub use scanner::Scanner;
pub use span::Span;
pub use splicer::{SkipTable, Splice, Step};
pub use state::{State, StateFlags, StateId, Transition};
pub use token::{is_punctuation_char, Token, TokenKind};
