//! Markdown output formatter

use super::{Document, OutputFormatter};
use anyhow::Result;
use std::io::Write;

/// One table per document with a total footer
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    match_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            match_count: 0,
        }
    }
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}

impl<W: Write + Send + Sync> OutputFormatter for MarkdownFormatter<W> {
    fn format_document(&mut self, document: &Document<'_>) -> Result<()> {
        let matches = document.matches();
        writeln!(self.writer, "## {}", document.source)?;
        writeln!(self.writer)?;
        if matches.is_empty() {
            writeln!(self.writer, "_No matches_")?;
            writeln!(self.writer)?;
            return Ok(());
        }

        writeln!(self.writer, "| Attribute | Start | End | Category | Text |")?;
        writeln!(self.writer, "|---|---|---|---|---|")?;
        for m in &matches {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} |",
                m.attribute,
                m.start,
                m.end,
                m.category.as_deref().unwrap_or(""),
                escape(&m.text)
            )?;
        }
        writeln!(self.writer)?;
        self.match_count += matches.len();
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        writeln!(self.writer, "---")?;
        writeln!(self.writer, "*Total matches: {}*", self.match_count)?;
        self.writer.flush()?;
        Ok(())
    }
}
