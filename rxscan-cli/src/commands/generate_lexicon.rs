//! Generate lexicon command implementation

use anyhow::{Context, Result};
use clap::Args;
use rxscan_engine::Lexicon;
use std::fs;
use std::path::PathBuf;

/// Arguments for the generate-lexicon command
#[derive(Debug, Args)]
pub struct GenerateLexiconArgs {
    /// Output file path for the lexicon
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Lexicon code written to the metadata section
    #[arg(long, default_value = "custom")]
    pub code: String,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateLexiconArgs {
    /// Execute the generate-lexicon command
    pub fn execute(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        let content = self.render()?;
        fs::write(&self.output, content)
            .with_context(|| format!("Failed to write lexicon: {}", self.output.display()))?;

        println!("✓ Lexicon written to {}", self.output.display());
        println!("  Edit the word lists, then check it with:");
        println!("  rxscan validate --lexicon {}", self.output.display());
        Ok(())
    }

    fn render(&self) -> Result<String> {
        let mut lexicon = Lexicon::embedded().clone();
        lexicon.metadata.code = self.code.clone();
        lexicon.metadata.name = format!(
            "{} (from {})",
            self.code,
            Lexicon::embedded().metadata.name
        );

        let body = toml::to_string_pretty(&lexicon).context("Failed to serialize lexicon")?;
        Ok(format!(
            "# rxscan lexicon\n#\n# Word lists for the attribute machines. Matching is case-insensitive.\n\n{body}"
        ))
    }
}
