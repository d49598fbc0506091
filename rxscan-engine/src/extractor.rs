//! Attribute extraction pipeline and builder

use crate::attribute::{Attribute, Category};
use crate::config::{ExtractorConfig, ExtractorConfigBuilder};
use crate::error::Result;
use crate::factory::scanner_for;
use crate::lexicon::Lexicon;
use rxscan_core::{OverrideSet, Scanner, Span, Token};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

struct Stage {
    attribute: Attribute,
    scanner: Scanner<Category>,
}

/// Runs the attribute scanners over one token sequence at a time
///
/// Scanners run in pipeline order. A scanner with dependencies sees the
/// spans of those attributes as override tokens labeled with the attribute
/// code, so `250 mg` reaches the strength scanner as amount plus one
/// `strength_unit` token.
pub struct Extractor {
    stages: Vec<Stage>,
    config: ExtractorConfig,
    lexicon_code: String,
}

/// Spans found per reported attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    spans: BTreeMap<Attribute, Vec<Span<Category>>>,
}

impl Extraction {
    /// Spans of one attribute, empty if it was not reported
    pub fn get(&self, attribute: Attribute) -> &[Span<Category>] {
        self.spans.get(&attribute).map(Vec::as_slice).unwrap_or_default()
    }

    /// Reported attributes with their spans, in attribute order
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &[Span<Category>])> {
        self.spans.iter().map(|(a, s)| (*a, s.as_slice()))
    }

    /// Number of reported attributes
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Whether no attribute was reported
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Span count across all reported attributes
    pub fn span_count(&self) -> usize {
        self.spans.values().map(Vec::len).sum()
    }
}

impl IntoIterator for Extraction {
    type Item = (Attribute, Vec<Span<Category>>);
    type IntoIter = std::collections::btree_map::IntoIter<Attribute, Vec<Span<Category>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.into_iter()
    }
}

impl Extractor {
    /// Extractor for every attribute using the embedded lexicon
    pub fn new() -> Result<Self> {
        Self::with_config(ExtractorConfig::default())
    }

    /// Extractor for the given attributes using the embedded lexicon
    pub fn for_attributes(attributes: &[Attribute]) -> Result<Self> {
        Self::with_config(ExtractorConfig {
            attributes: attributes.to_vec(),
            ..Default::default()
        })
    }

    /// Extractor with custom configuration
    pub fn with_config(config: ExtractorConfig) -> Result<Self> {
        config.validate()?;
        let lexicon = config.load_lexicon()?;

        let stages = config
            .pipeline()
            .into_iter()
            .map(|attribute| {
                Ok(Stage {
                    attribute,
                    scanner: scanner_for(attribute, &lexicon)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            lexicon = %lexicon.metadata.code,
            stages = stages.len(),
            "extractor ready"
        );
        Ok(Self {
            stages,
            lexicon_code: lexicon.metadata.code.clone(),
            config,
        })
    }

    /// The configuration this extractor was built from
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Code of the lexicon the machines were built from
    pub fn lexicon_code(&self) -> &str {
        &self.lexicon_code
    }

    /// Attributes that run, including unreported dependencies
    pub fn pipeline(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.stages.iter().map(|s| s.attribute)
    }

    /// Extract every requested attribute from one token sequence
    pub fn extract(&mut self, tokens: &[Token]) -> Result<Extraction> {
        let mut found: BTreeMap<Attribute, Vec<Span<Category>>> = BTreeMap::new();

        for stage in &mut self.stages {
            let overrides = stage
                .attribute
                .dependencies()
                .iter()
                .map(|dependency| {
                    let spans = found.get(dependency).map(Vec::as_slice).unwrap_or_default();
                    OverrideSet::from_spans(tokens, spans, dependency.code())
                })
                .collect::<rxscan_core::Result<Vec<_>>>()?;

            let spans = stage.scanner.scan_with(tokens, &overrides)?;
            debug!(
                attribute = %stage.attribute,
                overrides = overrides.iter().map(OverrideSet::len).sum::<usize>(),
                spans = spans.len(),
                "stage complete"
            );
            found.insert(stage.attribute, spans);
        }

        found.retain(|attribute, _| self.config.attributes.contains(attribute));
        Ok(Extraction { spans: found })
    }
}

/// Builder for [`Extractor`]
#[derive(Debug, Default)]
pub struct ExtractorBuilder {
    config_builder: ExtractorConfigBuilder,
}

impl ExtractorBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Request one attribute
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.config_builder = self.config_builder.attribute(attribute);
        self
    }

    /// Request several attributes
    pub fn attributes<I: IntoIterator<Item = Attribute>>(mut self, attributes: I) -> Self {
        self.config_builder = self.config_builder.attributes(attributes);
        self
    }

    /// Load the lexicon from a TOML file
    pub fn lexicon_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_builder = self.config_builder.lexicon_file(path);
        self
    }

    /// Use a parsed lexicon
    pub fn lexicon(mut self, lexicon: Lexicon) -> Self {
        self.config_builder = self.config_builder.lexicon(lexicon);
        self
    }

    /// Build the extractor
    pub fn build(self) -> Result<Extractor> {
        Extractor::with_config(self.config_builder.build()?)
    }
}
