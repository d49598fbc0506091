//! Plain text output formatter

use super::{Document, OutputFormatter};
use anyhow::Result;
use std::io::{self, Write};

/// One header line per document, then one tab-separated line per match
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TextFormatter<W> {
    fn format_document(&mut self, document: &Document<'_>) -> Result<()> {
        writeln!(self.writer, "# {}", document.source)?;
        for m in document.matches() {
            writeln!(
                self.writer,
                "{}\t{}\t{}\t{}\t{}",
                m.attribute,
                m.start,
                m.end,
                m.category.as_deref().unwrap_or("-"),
                m.text
            )?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
