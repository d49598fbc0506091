//! rxscan CLI library
//!
//! Command-line front end for extracting medication attributes from
//! prescription text with the rxscan engine.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;

pub use error::{CliError, CliResult};
