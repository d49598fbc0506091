//! Extractor configuration

use crate::attribute::Attribute;
use crate::error::{EngineError, Result};
use crate::lexicon::Lexicon;
use std::borrow::Cow;
use std::path::PathBuf;

/// Where the extractor takes its word lists from
#[derive(Debug, Clone, Default)]
pub enum LexiconSource {
    /// The lexicon compiled into the crate
    #[default]
    Embedded,
    /// A TOML file loaded when the extractor is built
    File(PathBuf),
    /// An already parsed lexicon
    Inline(Box<Lexicon>),
}

/// Extractor configuration
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Attributes to report; their dependencies run but are not reported
    pub attributes: Vec<Attribute>,
    /// Word lists for the machines
    pub lexicon: LexiconSource,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            attributes: Attribute::PIPELINE.to_vec(),
            lexicon: LexiconSource::Embedded,
        }
    }
}

impl ExtractorConfig {
    /// Report every attribute using the embedded lexicon
    pub fn new() -> Self {
        Self::default()
    }

    /// Amounts only: strengths, forms and dosages
    pub fn measures() -> Self {
        Self {
            attributes: vec![Attribute::Strength, Attribute::Form, Attribute::Dosage],
            ..Default::default()
        }
    }

    /// Timing only: frequencies and durations
    pub fn schedule() -> Self {
        Self {
            attributes: vec![
                Attribute::FrequencyUnit,
                Attribute::Frequency,
                Attribute::Duration,
            ],
            ..Default::default()
        }
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.attributes.is_empty() {
            return Err(EngineError::ConfigError(
                "at least one attribute must be requested".to_string(),
            ));
        }
        Ok(())
    }

    /// Requested attributes plus everything they depend on, in pipeline order
    pub fn pipeline(&self) -> Vec<Attribute> {
        let mut needed: Vec<Attribute> = self.attributes.clone();
        let mut index = 0;
        while index < needed.len() {
            for dependency in needed[index].dependencies() {
                if !needed.contains(dependency) {
                    needed.push(*dependency);
                }
            }
            index += 1;
        }
        Attribute::PIPELINE
            .into_iter()
            .filter(|a| needed.contains(a))
            .collect()
    }

    pub(crate) fn load_lexicon(&self) -> Result<Cow<'static, Lexicon>> {
        match &self.lexicon {
            LexiconSource::Embedded => Ok(Cow::Borrowed(Lexicon::embedded())),
            LexiconSource::File(path) => Ok(Cow::Owned(Lexicon::from_file(path)?)),
            LexiconSource::Inline(lexicon) => {
                lexicon.validate()?;
                Ok(Cow::Owned(lexicon.as_ref().clone()))
            }
        }
    }
}

/// Builder for [`ExtractorConfig`]
#[derive(Debug, Default)]
pub struct ExtractorConfigBuilder {
    attributes: Vec<Attribute>,
    lexicon: LexiconSource,
}

impl ExtractorConfigBuilder {
    /// Empty builder; with no attributes added every attribute is reported
    pub fn new() -> Self {
        Self::default()
    }

    /// Request one attribute
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        if !self.attributes.contains(&attribute) {
            self.attributes.push(attribute);
        }
        self
    }

    /// Request several attributes
    pub fn attributes<I: IntoIterator<Item = Attribute>>(mut self, attributes: I) -> Self {
        for attribute in attributes {
            self = self.attribute(attribute);
        }
        self
    }

    /// Load the lexicon from a TOML file
    pub fn lexicon_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.lexicon = LexiconSource::File(path.into());
        self
    }

    /// Use a parsed lexicon
    pub fn lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = LexiconSource::Inline(Box::new(lexicon));
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ExtractorConfig> {
        let attributes = if self.attributes.is_empty() {
            Attribute::PIPELINE.to_vec()
        } else {
            self.attributes
        };
        let config = ExtractorConfig {
            attributes,
            lexicon: self.lexicon,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_closes_over_dependencies() {
        let config = ExtractorConfig {
            attributes: vec![Attribute::Dosage],
            ..Default::default()
        };
        assert_eq!(
            config.pipeline(),
            vec![
                Attribute::Fraction,
                Attribute::Range,
                Attribute::StrengthUnit,
                Attribute::Form,
                Attribute::Strength,
                Attribute::Dosage,
            ]
        );
    }

    #[test]
    fn test_pipeline_without_dependencies() {
        let config = ExtractorConfig {
            attributes: vec![Attribute::Route],
            ..Default::default()
        };
        assert_eq!(config.pipeline(), vec![Attribute::Route]);
    }

    #[test]
    fn test_empty_attributes_rejected() {
        let config = ExtractorConfig {
            attributes: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::ConfigError(_))));
    }

    #[test]
    fn test_builder_defaults_to_everything() {
        let config = ExtractorConfigBuilder::new().build().unwrap();
        assert_eq!(config.attributes.len(), Attribute::PIPELINE.len());

        let config = ExtractorConfigBuilder::new()
            .attribute(Attribute::Route)
            .attribute(Attribute::Route)
            .build()
            .unwrap();
        assert_eq!(config.attributes, vec![Attribute::Route]);
    }

    #[test]
    fn test_presets() {
        assert!(ExtractorConfig::measures()
            .pipeline()
            .contains(&Attribute::StrengthUnit));
        assert!(ExtractorConfig::schedule()
            .pipeline()
            .contains(&Attribute::Range));
    }

    #[test]
    fn test_missing_lexicon_file() {
        let config = ExtractorConfigBuilder::new()
            .lexicon_file("/nonexistent/lexicon.toml")
            .build()
            .unwrap();
        assert!(matches!(config.load_lexicon(), Err(EngineError::IoError(_))));
    }
}
