use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lexicon {
    pub metadata: MetadataConfig,
    pub numbers: NumberConfig,
    pub strength: StrengthConfig,
    pub form: FormConfig,
    #[serde(default)]
    pub dosage: DosageConfig,
    pub route: RouteConfig,
    pub frequency_unit: FrequencyUnitConfig,
    pub frequency: FrequencyConfig,
    pub duration: DurationConfig,
    pub change_status: ChangeStatusConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumberConfig {
    pub words: Vec<String>,
    #[serde(default)]
    pub fractions: Vec<String>,
    #[serde(default)]
    pub hyphenated_fractions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrengthConfig {
    pub units: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DosageConfig {
    /// Complete dosages in one token, e.g. `half-tablet`
    #[serde(default)]
    pub solo: Vec<String>,
    /// Words joining two counts, e.g. `1 to 2 tablets`
    #[serde(default)]
    pub alternatives: Vec<String>,
    /// Extra count words beyond the shared number words
    #[serde(default)]
    pub counts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default)]
    pub connectors: Vec<String>,
    pub oral: RouteWords,
    pub topical: RouteWords,
    pub rectal: RouteWords,
    pub gastric: RouteWords,
    pub transdermal: RouteWords,
    pub intravenous: RouteWords,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteWords {
    /// Words naming the route on their own
    #[serde(default)]
    pub single: Vec<String>,
    /// Words naming the route after a connector, e.g. `by mouth`
    #[serde(default)]
    pub specified: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyUnitConfig {
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub fillers: Vec<String>,
    pub hour_suffixes: Vec<String>,
    #[serde(default)]
    pub one: UnitWords,
    #[serde(default)]
    pub two: UnitWords,
    #[serde(default)]
    pub three: UnitWords,
    #[serde(default)]
    pub four: UnitWords,
    #[serde(default)]
    pub five: UnitWords,
    #[serde(default)]
    pub six: UnitWords,
    #[serde(default)]
    pub every_other_day: UnitWords,
    #[serde(default)]
    pub weekly: UnitWords,
    #[serde(default)]
    pub monthly: UnitWords,
    #[serde(default)]
    pub yearly: UnitWords,
    #[serde(default)]
    pub as_needed: UnitWords,
    /// Interval in hours mapped to its abbreviations, e.g. `4 = ["q4h"]`
    #[serde(default)]
    pub hours: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitWords {
    #[serde(default)]
    pub single: Vec<String>,
    /// Words completing a unit after one of the prefixes
    #[serde(default)]
    pub suffix: Vec<String>,
    /// Fixed multi-word phrases, words separated by spaces
    #[serde(default)]
    pub phrases: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyConfig {
    pub counts: Vec<String>,
    pub connectors: Vec<String>,
    #[serde(default)]
    pub hyphenated: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DurationConfig {
    pub prefixes: Vec<String>,
    #[serde(default)]
    pub fillers: Vec<String>,
    #[serde(default)]
    pub quantities: Vec<String>,
    pub periods: Vec<String>,
    #[serde(default)]
    pub combined: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeStatusConfig {
    /// Words that may precede a status phrase, e.g. `then`
    #[serde(default)]
    pub lead_in: Vec<String>,
    pub start: StatusWords,
    pub stop: StatusWords,
    pub increase: StatusWords,
    pub decrease: StatusWords,
    pub increase_from: StatusWords,
    pub decrease_from: StatusWords,
    pub no_change: StatusWords,
    pub change: StatusWords,
    #[serde(default)]
    pub sum: StatusWords,
    pub max: StatusWords,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusWords {
    #[serde(default)]
    pub single: Vec<String>,
    /// First word of a two-word status
    #[serde(default)]
    pub first: Vec<String>,
    /// Second word of a two-word status
    #[serde(default)]
    pub second: Vec<String>,
    #[serde(default = "default_true")]
    pub lead_in: bool,
}

impl Default for StatusWords {
    fn default() -> Self {
        Self {
            single: Vec::new(),
            first: Vec::new(),
            second: Vec::new(),
            lead_in: true,
        }
    }
}

fn default_true() -> bool {
    true
}
