//! Validate command implementation

use anyhow::Result;
use clap::Args;
use rxscan_engine::factory::scanner_for;
use rxscan_engine::{Attribute, Lexicon};
use std::path::{Path, PathBuf};

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the lexicon file to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub lexicon: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating lexicon: {}", self.lexicon.display());

        match Self::check(&self.lexicon) {
            Ok(report) => {
                println!("✓ Lexicon is valid!");
                for line in report {
                    println!("  {line}");
                }
                Ok(())
            }
            Err(e) => {
                println!("✗ Lexicon is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {e}"))
            }
        }
    }

    /// Load the lexicon and build every attribute's machines
    fn check(path: &Path) -> rxscan_engine::Result<Vec<String>> {
        let lexicon = Lexicon::from_file(path)?;
        let mut report = vec![
            format!("Lexicon code: {}", lexicon.metadata.code),
            format!("Lexicon name: {}", lexicon.metadata.name),
        ];
        for attribute in Attribute::PIPELINE {
            let scanner = scanner_for(attribute, &lexicon)?;
            report.push(format!("{}: {} machines", attribute.code(), scanner.len()));
        }
        Ok(report)
    }
}
