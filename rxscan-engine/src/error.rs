//! Engine error types

use rxscan_core::CoreError;
use thiserror::Error;

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Machine construction or scanning failed
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// Lexicon could not be parsed or failed validation
    #[error("invalid lexicon: {0}")]
    Lexicon(String),

    /// Attribute code not recognized
    #[error("unknown attribute '{0}'")]
    UnknownAttribute(String),

    /// Invalid extractor configuration
    #[error("invalid configuration: {0}")]
    ConfigError(String),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(String),
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
