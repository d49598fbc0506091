//! Output formatting module

use anyhow::Result;
use rxscan_core::{Span, Token};
use rxscan_engine::{Attribute, Category, Extraction};
use serde::Serialize;

/// One processed input with its extraction
pub struct Document<'a> {
    /// Display name, usually the input path
    pub source: &'a str,
    /// Original text when the input was plain text
    pub text: Option<&'a str>,
    /// Tokens the extraction ran over
    pub tokens: &'a [Token],
    /// Spans per attribute
    pub extraction: &'a Extraction,
}

/// Flattened span ready for printing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub attribute: &'static str,
    pub start: usize,
    pub end: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub text: String,
}

impl Document<'_> {
    /// Matches in pipeline order, then by offset
    pub fn matches(&self) -> Vec<Match> {
        self.extraction
            .iter()
            .flat_map(|(attribute, spans)| {
                spans.iter().map(move |span| Match {
                    attribute: attribute.code(),
                    start: span.start,
                    end: span.end,
                    category: span.category.map(|c| c.to_string()),
                    text: self.matched_text(span),
                })
            })
            .collect()
    }

    fn matched_text(&self, span: &Span<Category>) -> String {
        if let Some(text) = self.text.and_then(|source| span.text(source)) {
            return text.to_string();
        }
        // token input carries no source text
        self.tokens
            .iter()
            .filter(|token| span.covers(token))
            .map(Token::text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Writes extraction results in one output format
pub trait OutputFormatter: Send + Sync {
    /// Format the matches of one document
    fn format_document(&mut self, document: &Document<'_>) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Attribute codes accepted on the command line
pub fn attribute_codes() -> impl Iterator<Item = &'static str> {
    Attribute::PIPELINE.iter().map(Attribute::code)
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;


#[cfg(test)]
mod tests {
    use super::*;
    use rxscan_engine::Extractor;

    #[test]
    fn test_matches_slice_source_text() {
        let tokens = fixture::tokens();
        let extraction = fixture::extraction(&tokens);
        let document = Document {
            source: "sig.txt",
            text: Some(fixture::TEXT),
            tokens: &tokens,
            extraction: &extraction,
        };

        let matches = document.matches();
        assert_eq!(
            matches,
            vec![
                Match {
                    attribute: "route",
                    start: 12,
                    end: 14,
                    category: Some("ORAL".to_string()),
                    text: "po".to_string(),
                },
                Match {
                    attribute: "frequency_unit",
                    start: 15,
                    end: 18,
                    category: Some("TWO".to_string()),
                    text: "bid".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_matches_join_tokens_without_text() {
        let tokens = vec![
            Token::new("by", 0, 2).unwrap(),
            Token::new("mouth", 10, 15).unwrap(),
        ];
        let extraction = Extractor::for_attributes(&[Attribute::Route])
            .unwrap()
            .extract(&tokens)
            .unwrap();
        let document = Document {
            source: "tokens.json",
            text: None,
            tokens: &tokens,
            extraction: &extraction,
        };

        let matches = document.matches();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].text, "by mouth");
        assert_eq!((matches[0].start, matches[0].end), (0, 15));
    }

    #[test]
    fn test_attribute_codes_follow_pipeline() {
        let codes: Vec<_> = attribute_codes().collect();
        assert_eq!(codes.first(), Some(&"fraction"));
        assert_eq!(codes.last(), Some(&"duration"));
        assert_eq!(codes.len(), 11);
    }
}
