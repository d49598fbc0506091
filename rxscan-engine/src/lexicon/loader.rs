use super::types::Lexicon;
use crate::error::{EngineError, Result};
use std::path::Path;
use std::sync::OnceLock;

static EMBEDDED_LEXICON: OnceLock<Lexicon> = OnceLock::new();

const CLINICAL_TOML: &str = include_str!("../../configs/lexicons/clinical.toml");

/// The built-in clinical lexicon, parsed once per process
pub fn embedded_lexicon() -> &'static Lexicon {
    EMBEDDED_LEXICON.get_or_init(|| {
        parse_lexicon(CLINICAL_TOML, "embedded").expect("embedded lexicon is valid")
    })
}

/// Parse and validate a lexicon document
pub fn parse_lexicon(content: &str, origin: &str) -> Result<Lexicon> {
    let lexicon: Lexicon = toml::from_str(content)
        .map_err(|e| EngineError::Lexicon(format!("failed to parse {origin} lexicon: {e}")))?;
    lexicon.validate()?;
    Ok(lexicon)
}

/// Load and validate a lexicon file
pub fn load_lexicon_file(path: &Path) -> Result<Lexicon> {
    let content = std::fs::read_to_string(path)?;
    parse_lexicon(&content, &path.display().to_string())
}
