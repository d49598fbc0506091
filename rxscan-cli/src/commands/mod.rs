//! CLI command implementations

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use rxscan_engine::Attribute;

pub mod extract;
pub mod generate_lexicon;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Extract medication attributes from text files
    Extract(extract::ExtractArgs),

    /// Check that a lexicon file loads and builds every machine
    Validate(validate::ValidateArgs),

    /// Write the embedded lexicon as a starting point for a custom one
    GenerateLexicon(generate_lexicon::GenerateLexiconArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List extractable attributes in pipeline order
    Attributes,

    /// List available output formats
    Formats,
}

impl Commands {
    /// Run the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Extract(args) => args.execute(),
            Commands::Validate(args) => args.execute(),
            Commands::GenerateLexicon(args) => args.execute(),
            Commands::List { subcommand } => {
                subcommand.execute();
                Ok(())
            }
        }
    }
}

impl ListCommands {
    fn execute(&self) {
        match self {
            ListCommands::Attributes => {
                println!("Attributes (pipeline order):");
                for attribute in Attribute::PIPELINE {
                    let needs = attribute
                        .dependencies()
                        .iter()
                        .map(Attribute::code)
                        .collect::<Vec<_>>();
                    if needs.is_empty() {
                        println!("  {}", attribute.code());
                    } else {
                        println!("  {} (uses {})", attribute.code(), needs.join(", "));
                    }
                }
            }
            ListCommands::Formats => {
                println!("Output formats:");
                for format in extract::OutputFormat::value_variants() {
                    if let Some(value) = format.to_possible_value() {
                        let help = value.get_help().map(ToString::to_string);
                        println!("  {:<10} {}", value.get_name(), help.unwrap_or_default());
                    }
                }
            }
        }
    }
}
