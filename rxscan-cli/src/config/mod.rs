//! Configuration file for the extract command

use crate::error::CliError;
use anyhow::{Context, Result};
use rxscan_engine::Attribute;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Extraction configuration
    #[serde(default)]
    pub extraction: ExtractionSection,

    /// Output configuration
    #[serde(default)]
    pub output: OutputSection,
}

/// Which attributes to report and which lexicon to build them from
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct ExtractionSection {
    /// Attribute codes; empty means all
    #[serde(default)]
    pub attributes: Vec<String>,

    /// Lexicon file replacing the embedded lexicon
    pub lexicon: Option<PathBuf>,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct OutputSection {
    /// Default output format
    pub format: Option<String>,

    /// Pretty print JSON output
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,
}

fn default_pretty_json() -> bool {
    true
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            format: None,
            pretty_json: default_pretty_json(),
        }
    }
}

impl CliConfig {
    /// Load a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(format!("{}: {e}", path.display())))?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse the configured attribute codes
    pub fn attributes(&self) -> Result<Vec<Attribute>> {
        self.extraction
            .attributes
            .iter()
            .map(|code| {
                Attribute::from_code(code)
                    .map_err(|e| CliError::ConfigError(e.to_string()).into())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config: CliConfig = toml::from_str("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert!(config.output.pretty_json);
        assert!(config.attributes().unwrap().is_empty());
    }

    #[test]
    fn test_load_sections() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rxscan.toml");
        fs::write(
            &path,
            r#"
[extraction]
attributes = ["route", "frequency-unit"]
lexicon = "custom.toml"

[output]
format = "json"
pretty_json = false
"#,
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(
            config.attributes().unwrap(),
            vec![Attribute::Route, Attribute::FrequencyUnit]
        );
        assert_eq!(config.extraction.lexicon, Some(PathBuf::from("custom.toml")));
        assert_eq!(config.output.format.as_deref(), Some("json"));
        assert!(!config.output.pretty_json);
    }

    #[test]
    fn test_unknown_attribute() {
        let config: CliConfig = toml::from_str("[extraction]\nattributes = [\"dose\"]").unwrap();
        let err = config.attributes().unwrap_err();
        assert!(err.to_string().contains("unknown attribute 'dose'"));
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[output\nformat = 1").unwrap();

        let err = CliConfig::load(&path).unwrap_err();
        assert!(err.downcast_ref::<CliError>().is_some());
    }
}
