//! Attribute kinds and the category tags their spans carry

use crate::error::{EngineError, Result};
use std::fmt;
use std::str::FromStr;

/// A clinical attribute extracted by one scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    /// Fractions and split decimals: `1/2`, `0 . 5`, `one half`
    Fraction,
    /// Numeric ranges: `1-2`, `1 to 2`
    Range,
    /// Change of medication status: `started`, `increase from`
    ChangeStatus,
    /// Strength units: `mg`, `%`, `- mg`
    StrengthUnit,
    /// Dosage forms: `tablets`, `cream`
    Form,
    /// Amount with unit: `250 mg`
    Strength,
    /// Count of forms: `2 tablets`
    Dosage,
    /// Route of administration: `p.o.`, `by mouth`
    Route,
    /// Frequency units: `bid`, `a day`, `q4h`
    FrequencyUnit,
    /// Counted frequencies: `three times a day`
    Frequency,
    /// Treatment duration: `for 10 days`
    Duration,
}

impl Attribute {
    /// Every attribute in pipeline order
    pub const PIPELINE: [Attribute; 11] = [
        Attribute::Fraction,
        Attribute::Range,
        Attribute::ChangeStatus,
        Attribute::StrengthUnit,
        Attribute::Form,
        Attribute::Strength,
        Attribute::Dosage,
        Attribute::Route,
        Attribute::FrequencyUnit,
        Attribute::Frequency,
        Attribute::Duration,
    ];

    /// Stable code used in labels, configs and output
    pub fn code(&self) -> &'static str {
        match self {
            Attribute::Fraction => "fraction",
            Attribute::Range => "range",
            Attribute::ChangeStatus => "change_status",
            Attribute::StrengthUnit => "strength_unit",
            Attribute::Form => "form",
            Attribute::Strength => "strength",
            Attribute::Dosage => "dosage",
            Attribute::Route => "route",
            Attribute::FrequencyUnit => "frequency_unit",
            Attribute::Frequency => "frequency",
            Attribute::Duration => "duration",
        }
    }

    /// Look up an attribute by code; `-` and `_` are interchangeable
    pub fn from_code(code: &str) -> Result<Self> {
        let normalized = code.trim().to_ascii_lowercase().replace('-', "_");
        Self::PIPELINE
            .into_iter()
            .find(|a| a.code() == normalized)
            .ok_or_else(|| EngineError::UnknownAttribute(code.to_string()))
    }

    /// Attributes whose spans are spliced in as overrides, in set order
    pub fn dependencies(&self) -> &'static [Attribute] {
        match self {
            Attribute::StrengthUnit => &[Attribute::Range],
            Attribute::Strength => &[Attribute::StrengthUnit, Attribute::Fraction],
            Attribute::Dosage => &[Attribute::Fraction, Attribute::Form, Attribute::Strength],
            Attribute::Frequency => &[Attribute::FrequencyUnit, Attribute::Range],
            Attribute::Duration => &[Attribute::Range],
            _ => &[],
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Attribute {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_code(s)
    }
}

/// Change-of-status tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChangeStatus {
    /// Medication started
    Start,
    /// Medication stopped
    Stop,
    /// Dose increased
    Increase,
    /// Dose decreased
    Decrease,
    /// Increased from a previous dose
    IncreaseFrom,
    /// Decreased from a previous dose
    DecreaseFrom,
    /// Explicitly unchanged
    NoChange,
    /// Other change
    Other,
    /// Added on top of a dose
    Sum,
    /// Maximum dose
    Max,
}

impl ChangeStatus {
    /// Upper-case tag name
    pub fn code(&self) -> &'static str {
        match self {
            ChangeStatus::Start => "START",
            ChangeStatus::Stop => "STOP",
            ChangeStatus::Increase => "INCREASE",
            ChangeStatus::Decrease => "DECREASE",
            ChangeStatus::IncreaseFrom => "INCREASEFROM",
            ChangeStatus::DecreaseFrom => "DECREASEFROM",
            ChangeStatus::NoChange => "NOCHANGE",
            ChangeStatus::Other => "OTHER",
            ChangeStatus::Sum => "SUM",
            ChangeStatus::Max => "MAX",
        }
    }

    /// Name of the `[change_status]` table holding this status's words
    pub(crate) fn lexicon_key(&self) -> &'static str {
        match self {
            ChangeStatus::Start => "start",
            ChangeStatus::Stop => "stop",
            ChangeStatus::Increase => "increase",
            ChangeStatus::Decrease => "decrease",
            ChangeStatus::IncreaseFrom => "increase_from",
            ChangeStatus::DecreaseFrom => "decrease_from",
            ChangeStatus::NoChange => "no_change",
            ChangeStatus::Other => "change",
            ChangeStatus::Sum => "sum",
            ChangeStatus::Max => "max",
        }
    }
}

/// Route-of-administration tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Route {
    /// By mouth
    Oral,
    /// On the skin or mucosa
    Topical,
    /// Rectal
    Rectal,
    /// Through a gastric or duodenal tube
    Gastric,
    /// Through a skin patch
    Transdermal,
    /// Injected
    Intravenous,
}

impl Route {
    /// Upper-case tag name
    pub fn code(&self) -> &'static str {
        match self {
            Route::Oral => "ORAL",
            Route::Topical => "TOPICAL",
            Route::Rectal => "RECTAL",
            Route::Gastric => "GASTRIC",
            Route::Transdermal => "TRANSDERMAL",
            Route::Intravenous => "INTRAVENOUS",
        }
    }
}

/// Frequency-unit tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrequencyUnit {
    /// Once a day
    One,
    /// Twice a day
    Two,
    /// Three times a day
    Three,
    /// Four times a day
    Four,
    /// Five times a day
    Five,
    /// Six times a day
    Six,
    /// Every N hours, i.e. 24/N times a day
    EveryHours(u8),
    /// Every other day
    EveryOtherDay,
    /// Once a week
    Weekly,
    /// Once a month
    Monthly,
    /// Once a year
    Yearly,
    /// As needed
    AsNeeded,
}

impl FrequencyUnit {
    /// Administrations per day, `None` for as-needed
    pub fn per_day(&self) -> Option<f64> {
        let value = match self {
            FrequencyUnit::One => 1.0,
            FrequencyUnit::Two => 2.0,
            FrequencyUnit::Three => 3.0,
            FrequencyUnit::Four => 4.0,
            FrequencyUnit::Five => 5.0,
            FrequencyUnit::Six => 6.0,
            FrequencyUnit::EveryHours(hours) => 24.0 / f64::from(*hours),
            FrequencyUnit::EveryOtherDay => 0.5,
            FrequencyUnit::Weekly => 1.0 / 7.0,
            FrequencyUnit::Monthly => 1.0 / 30.0,
            FrequencyUnit::Yearly => 1.0 / 365.0,
            FrequencyUnit::AsNeeded => return None,
        };
        Some(value)
    }
}

impl fmt::Display for FrequencyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrequencyUnit::One => f.write_str("ONE"),
            FrequencyUnit::Two => f.write_str("TWO"),
            FrequencyUnit::Three => f.write_str("THREE"),
            FrequencyUnit::Four => f.write_str("FOUR"),
            FrequencyUnit::Five => f.write_str("FIVE"),
            FrequencyUnit::Six => f.write_str("SIX"),
            FrequencyUnit::EveryHours(hours) => write!(f, "24/{hours}"),
            FrequencyUnit::EveryOtherDay => f.write_str("EVERY_OTHER_DAY"),
            FrequencyUnit::Weekly => f.write_str("WEEKLY"),
            FrequencyUnit::Monthly => f.write_str("MONTHLY"),
            FrequencyUnit::Yearly => f.write_str("YEARLY"),
            FrequencyUnit::AsNeeded => f.write_str("PRN"),
        }
    }
}

/// Category tag attached to a span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Change-of-status span
    ChangeStatus(ChangeStatus),
    /// Route span
    Route(Route),
    /// Frequency-unit span
    FrequencyUnit(FrequencyUnit),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::ChangeStatus(status) => f.write_str(status.code()),
            Category::Route(route) => f.write_str(route.code()),
            Category::FrequencyUnit(unit) => unit.fmt(f),
        }
    }
}
