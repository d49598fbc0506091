//! JSON output formatter

use super::{Document, Match, OutputFormatter};
use anyhow::Result;
use serde::Serialize;
use std::io::Write;

/// Collects every document and writes one JSON object on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    lexicon: String,
    documents: Vec<DocumentData>,
}

/// Serialized form of one document
#[derive(Debug, Serialize)]
pub struct DocumentData {
    pub source: String,
    pub tokens: usize,
    pub matches: Vec<Match>,
}

#[derive(Serialize)]
struct Report<'a> {
    lexicon: &'a str,
    documents: &'a [DocumentData],
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter for results of the given lexicon
    pub fn new(writer: W, pretty: bool, lexicon: impl Into<String>) -> Self {
        Self {
            writer,
            pretty,
            lexicon: lexicon.into(),
            documents: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_document(&mut self, document: &Document<'_>) -> Result<()> {
        self.documents.push(DocumentData {
            source: document.source.to_string(),
            tokens: document.tokens.len(),
            matches: document.matches(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let report = Report {
            lexicon: &self.lexicon,
            documents: &self.documents,
        };
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &report)?;
        } else {
            serde_json::to_writer(&mut self.writer, &report)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
