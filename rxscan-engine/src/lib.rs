//! Clinical medication attribute extraction
//!
//! This crate wires `rxscan-core` machines into an extraction pipeline:
//! lexicon word lists become machines, machines become one scanner per
//! attribute, and scanners run in dependency order with upstream spans
//! spliced in as override tokens.
//!
//! ```
//! use rxscan_engine::{Attribute, Extractor, Token};
//!
//! let tokens = vec![
//!     Token::new("250", 0, 3).unwrap(),
//!     Token::new("mg", 4, 6).unwrap(),
//!     Token::new("bid", 7, 10).unwrap(),
//! ];
//! let mut extractor = Extractor::new().unwrap();
//! let extraction = extractor.extract(&tokens).unwrap();
//! assert_eq!(extraction.get(Attribute::Strength)[0].end, 6);
//! ```

pub mod attribute;
pub mod config;
pub mod error;
pub mod extractor;
pub mod factory;
pub mod lexicon;

pub use attribute::{Attribute, Category, ChangeStatus, FrequencyUnit, Route};
pub use config::{ExtractorConfig, ExtractorConfigBuilder, LexiconSource};
pub use error::{EngineError, Result};
pub use extractor::{Extraction, Extractor, ExtractorBuilder};
pub use lexicon::Lexicon;

// Re-export from core for convenience
pub use rxscan_core::{Span, Token, TokenKind};
