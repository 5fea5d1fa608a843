use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Discrete confidence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Low,
    Med,
    High,
}

impl Tier {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Med => "MED",
            Self::High => "HIGH",
        }
    }

    /// Lower-case class name used by renderers.
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Med => "med",
            Self::High => "high",
        }
    }
}

impl Display for Tier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tier for a factor score on the 0..1 scale. Boundaries belong to the
/// higher tier; NaN is LOW.
pub fn factor_tier(score: f64) -> Tier {
    if score >= 0.7 {
        Tier::High
    } else if score >= 0.4 {
        Tier::Med
    } else {
        Tier::Low
    }
}

/// Tier for a confidence score on the 0..100 scale. Boundaries belong to the
/// higher tier; NaN is LOW.
///
/// Kept separate from [`factor_tier`]: the two scales come from different
/// producers and are not interchangeable.
pub fn confidence_tier(score: f64) -> Tier {
    if score >= 60.0 {
        Tier::High
    } else if score >= 30.0 {
        Tier::Med
    } else {
        Tier::Low
    }
}

/// Which of the two score scales a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierScale {
    Factor,
    Confidence,
}

impl TierScale {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Factor => "factor",
            Self::Confidence => "confidence",
        }
    }

    pub fn classify(self, score: f64) -> Tier {
        match self {
            Self::Factor => factor_tier(score),
            Self::Confidence => confidence_tier(score),
        }
    }
}

impl FromStr for TierScale {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "factor" => Ok(Self::Factor),
            "confidence" => Ok(Self::Confidence),
            other => Err(ValidationError::InvalidTierScale {
                value: other.to_owned(),
            }),
        }
    }
}

/// Score rendered as a whole percentage, e.g. `0.724` -> `72%`.
pub fn score_percent(score: f64) -> String {
    if !score.is_finite() {
        return format!("{}%", crate::value::display_float(score));
    }
    // Halves round toward positive infinity.
    let rounded = (score * 100.0 + 0.5).floor();
    format!("{}%", crate::value::display_float(rounded))
}
