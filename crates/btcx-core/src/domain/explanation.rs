use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use super::decimal::deserialize_loose_decimal;
use crate::value::{number_of, parse_decimal};
use crate::Direction;

/// Scored piece of evidence attached to an explanation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Factor {
    pub name: String,
    pub score: f64,
    pub evidence: Map<String, Value>,
}

impl Factor {
    pub fn new(name: impl Into<String>, score: f64, evidence: Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            score,
            evidence,
        }
    }

    /// Reads a factor out of an arbitrary JSON value. Missing or mistyped
    /// fields degrade to an empty name, a NaN score or empty evidence.
    pub fn from_value(value: &Value) -> Self {
        let name = value
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let score = value.get("score").map_or(f64::NAN, number_of);
        let evidence = value
            .get("evidence")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();

        Self {
            name,
            score,
            evidence,
        }
    }

    /// Evidence field, treating JSON `null` as absent.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.evidence.get(key).filter(|value| !value.is_null())
    }
}

impl<'de> Deserialize<'de> for Factor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        if !value.is_object() {
            return Err(D::Error::custom("factor must be a JSON object"));
        }
        Ok(Self::from_value(&value))
    }
}

/// First factor with exactly this name, in received order.
pub fn find_factor<'a>(factors: &'a [Factor], name: &str) -> Option<&'a Factor> {
    factors.iter().find(|factor| factor.name == name)
}

/// Why a `factorsJson` payload was replaced by an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorsIssue {
    Malformed,
    NotAList,
}

impl FactorsIssue {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Malformed => "factorsJson could not be parsed; showing no factors",
            Self::NotAList => "factorsJson is not a list; showing no factors",
        }
    }
}

/// Result of reading `factorsJson`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParsedFactors {
    pub factors: Vec<Factor>,
    pub issue: Option<FactorsIssue>,
}

/// Parses a serialized factor list. Malformed or non-list payloads resolve to
/// an empty list and never fail.
pub fn parse_factors(raw: Option<&str>) -> ParsedFactors {
    let Some(raw) = raw.filter(|raw| !raw.is_empty()) else {
        return ParsedFactors::default();
    };

    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => ParsedFactors {
            factors: items.iter().map(Factor::from_value).collect(),
            issue: None,
        },
        Ok(_) => {
            warn!("factorsJson parsed to a non-list value, using no factors");
            ParsedFactors {
                factors: Vec::new(),
                issue: Some(FactorsIssue::NotAList),
            }
        }
        Err(error) => {
            warn!(%error, "factorsJson is malformed, using no factors");
            ParsedFactors {
                factors: Vec::new(),
                issue: Some(FactorsIssue::Malformed),
            }
        }
    }
}

/// Explanation payload for one move event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Explanation {
    pub event_id: i64,
    pub event_date: String,
    pub direction: String,
    #[serde(deserialize_with = "deserialize_loose_decimal")]
    pub pct_change: String,
    #[serde(default)]
    pub confidence: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub ai_explanation: Option<String>,
    #[serde(default)]
    pub ai_source: Option<String>,
    #[serde(default)]
    pub ai_model: Option<String>,
    #[serde(default)]
    pub factors_json: Option<String>,
}

impl Explanation {
    /// Parsed direction, `None` when the payload carries something other than
    /// `UP`/`DOWN`.
    pub fn direction(&self) -> Option<Direction> {
        self.direction.parse().ok()
    }

    pub fn pct_value(&self) -> f64 {
        parse_decimal(&self.pct_change)
    }

    /// Externally generated narrative, if it carries any text.
    pub fn usable_ai_explanation(&self) -> Option<&str> {
        self.ai_explanation
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    pub fn factors(&self) -> ParsedFactors {
        parse_factors(self.factors_json.as_deref())
    }
}
