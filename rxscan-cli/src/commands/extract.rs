//! Extract command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, FileReader, Tokenizer};
use crate::output::{
    Document, JsonFormatter, MarkdownFormatter, OutputFormatter, TextFormatter,
};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use rxscan_engine::{Attribute, Extractor, ExtractorBuilder};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Arguments for the extract command
#[derive(Debug, Args)]
pub struct ExtractArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Attributes to report, comma separated (default: all)
    #[arg(
        short,
        long = "attribute",
        value_name = "CODE",
        value_delimiter = ',',
        value_parser = parse_attribute
    )]
    pub attributes: Vec<Attribute>,

    /// Lexicon file replacing the embedded lexicon
    #[arg(short, long, value_name = "FILE")]
    pub lexicon: Option<PathBuf>,

    /// Inputs are JSON token arrays instead of plain text
    #[arg(long)]
    pub tokens: bool,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated lines per match
    Text,
    /// JSON report with every document
    Json,
    /// Markdown table per document
    Markdown,
}

fn parse_attribute(code: &str) -> Result<Attribute, String> {
    Attribute::from_code(code).map_err(|e| e.to_string())
}

impl ExtractArgs {
    /// Execute the extract command
    pub fn execute(&self) -> Result<()> {
        self.init_logging();

        log::info!("Starting extraction");
        log::debug!("Arguments: {self:?}");

        let config = match &self.config {
            Some(path) => CliConfig::load(path)?,
            None => CliConfig::default(),
        };
        let format = self.resolve_format(&config)?;
        let mut extractor = self.build_extractor(&config)?;
        log::info!(
            "Lexicon '{}', attributes: {}",
            extractor.lexicon_code(),
            extractor
                .config()
                .attributes
                .iter()
                .map(Attribute::code)
                .collect::<Vec<_>>()
                .join(", ")
        );

        let files = resolve_patterns(&self.input)?;
        let tokenizer = Tokenizer::new()?;

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => Box::new(BufWriter::new(File::create(path).with_context(|| {
                format!("Failed to create output file: {}", path.display())
            })?)),
            None => Box::new(io::stdout()),
        };
        let mut formatter: Box<dyn OutputFormatter> = match format {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(
                writer,
                config.output.pretty_json,
                extractor.lexicon_code(),
            )),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        };

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        for path in &files {
            let source = path.display().to_string();
            let (text, tokens) = if self.tokens {
                (None, FileReader::read_tokens(path)?)
            } else {
                let text = FileReader::read_text(path)?;
                let tokens = tokenizer.tokenize(&text)?;
                (Some(text), tokens)
            };

            let extraction = extractor
                .extract(&tokens)
                .map_err(|e| CliError::ExtractionError(format!("{source}: {e}")))?;
            log::info!(
                "{source}: {} tokens, {} matches",
                tokens.len(),
                extraction.span_count()
            );

            formatter.format_document(&Document {
                source: &source,
                text: text.as_deref(),
                tokens: &tokens,
                extraction: &extraction,
            })?;
            progress.file_completed(&source, extraction.span_count());
        }

        progress.finish();
        formatter.finish()?;
        log::info!("Processed {} files", files.len());

        Ok(())
    }

    /// Command line wins over the config file, then text
    fn resolve_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }
        match config.output.format.as_deref() {
            Some(name) => OutputFormat::from_str(name, true).map_err(|_| {
                CliError::ConfigError(format!("unknown output format '{name}'")).into()
            }),
            None => Ok(OutputFormat::Text),
        }
    }

    fn build_extractor(&self, config: &CliConfig) -> Result<Extractor> {
        let attributes = if self.attributes.is_empty() {
            config.attributes()?
        } else {
            self.attributes.clone()
        };

        // config-relative lexicon paths resolve against the config file
        let lexicon = self.lexicon.clone().or_else(|| {
            let path = config.extraction.lexicon.as_ref()?;
            let base = self.config.as_deref().and_then(Path::parent);
            Some(match base {
                Some(dir) if path.is_relative() => dir.join(path),
                _ => path.clone(),
            })
        });

        let mut builder = ExtractorBuilder::new().attributes(attributes);
        if let Some(path) = lexicon {
            log::debug!("Using lexicon file {}", path.display());
            builder = builder.lexicon_file(path);
        }
        let extractor = builder
            .build()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(extractor)
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}
