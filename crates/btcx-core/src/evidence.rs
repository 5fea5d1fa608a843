//! Schema selection and field extraction for factor evidence.
//!
//! Factor names act as a discriminant: five registered names map onto four
//! evidence schemas, anything else falls through to a generic key/value view.
//! Extraction never fails. Absent and `null` fields are omitted, and text
//! fields that are empty are omitted as well.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::value::{display_value, is_truthy};
use crate::Factor;

/// Headlines shown on a news card.
pub const DISPLAY_HEADLINE_LIMIT: usize = 20;

/// Evidence entries shown for an unregistered factor.
pub const GENERIC_ENTRY_LIMIT: usize = 6;

pub const NO_HEADLINES_MESSAGE: &str = "No headlines stored for this date.";
pub const NO_EVIDENCE_MESSAGE: &str = "No evidence captured.";

/// Registered factor names, plus the fallback for everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorKind {
    NewsActivity,
    NewsIntensity,
    FearGreedIndex,
    FxEurUsd,
    WeatherRisk,
    Unregistered,
}

impl FactorKind {
    pub const REGISTERED: [Self; 5] = [
        Self::NewsActivity,
        Self::NewsIntensity,
        Self::FearGreedIndex,
        Self::FxEurUsd,
        Self::WeatherRisk,
    ];

    /// Exact, case-sensitive lookup.
    pub fn of(name: &str) -> Self {
        Self::REGISTERED
            .into_iter()
            .find(|kind| kind.registered_name() == Some(name))
            .unwrap_or(Self::Unregistered)
    }

    pub const fn registered_name(self) -> Option<&'static str> {
        match self {
            Self::NewsActivity => Some("News activity"),
            Self::NewsIntensity => Some("News intensity"),
            Self::FearGreedIndex => Some("Fear & Greed Index"),
            Self::FxEurUsd => Some("FX context (EUR/USD)"),
            Self::WeatherRisk => Some("Weather risk"),
            Self::Unregistered => None,
        }
    }
}

/// Label/value pair ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvidenceRow {
    pub label: String,
    pub value: String,
}

impl EvidenceRow {
    fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsEvidence {
    pub value: Option<Value>,
    pub source_date: Option<Value>,
    pub articles_count: Option<Value>,
    pub coverage_pct: Option<Value>,
    pub query_tag: Option<Value>,
    pub note: Option<Value>,
    /// Every stored headline; see [`NewsEvidence::display_headlines`].
    pub sample_headlines: Vec<String>,
}

impl NewsEvidence {
    pub fn display_headlines(&self) -> &[String] {
        let end = self.sample_headlines.len().min(DISPLAY_HEADLINE_LIMIT);
        &self.sample_headlines[..end]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FearGreedEvidence {
    pub value: Option<Value>,
    pub classification: Option<Value>,
    pub source_date: Option<Value>,
    pub explanation: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FxEvidence {
    pub eur_usd_rate: Option<Value>,
    pub day_change_pct: Option<Value>,
    pub source_date: Option<Value>,
    pub note: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherEvidence {
    pub condition: Option<Value>,
    pub temp_c: Option<Value>,
    pub source_date: Option<Value>,
    pub note: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenericEvidence {
    pub explanation: Option<Value>,
    pub note: Option<Value>,
    pub entries: Vec<(String, Value)>,
}

impl GenericEvidence {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Evidence extracted according to the factor's schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "schema", rename_all = "snake_case")]
pub enum FactorEvidence {
    News(NewsEvidence),
    FearGreed(FearGreedEvidence),
    Fx(FxEvidence),
    Weather(WeatherEvidence),
    Generic(GenericEvidence),
}

impl FactorEvidence {
    pub fn extract(factor: &Factor) -> Self {
        Self::extract_as(FactorKind::of(&factor.name), &factor.evidence)
    }

    pub fn extract_as(kind: FactorKind, evidence: &Map<String, Value>) -> Self {
        let fields = Fields(evidence);
        match kind {
            FactorKind::NewsActivity | FactorKind::NewsIntensity => Self::News(NewsEvidence {
                value: fields.present("value"),
                source_date: fields.truthy("sourceDate"),
                articles_count: fields.present("articlesCount"),
                coverage_pct: fields.present("coveragePct"),
                query_tag: fields.truthy("queryTag"),
                note: fields.truthy("note"),
                sample_headlines: fields.strings("sampleHeadlines"),
            }),
            FactorKind::FearGreedIndex => Self::FearGreed(FearGreedEvidence {
                value: fields.present("value"),
                classification: fields.truthy("classification"),
                source_date: fields.truthy("sourceDate"),
                explanation: fields.truthy("explanation"),
            }),
            FactorKind::FxEurUsd => Self::Fx(FxEvidence {
                eur_usd_rate: fields.present("eurUsdRate"),
                day_change_pct: fields.present("dayChangePct"),
                source_date: fields.truthy("sourceDate"),
                note: fields.truthy("note"),
            }),
            FactorKind::WeatherRisk => Self::Weather(WeatherEvidence {
                condition: fields.truthy("condition"),
                temp_c: fields.present("tempC"),
                source_date: fields.truthy("sourceDate"),
                note: fields.truthy("note"),
            }),
            FactorKind::Unregistered => Self::Generic(GenericEvidence {
                explanation: fields.truthy("explanation"),
                note: fields.truthy("note"),
                entries: evidence
                    .iter()
                    .take(GENERIC_ENTRY_LIMIT)
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
            }),
        }
    }

    /// Key/value rows in display order.
    pub fn rows(&self) -> Vec<EvidenceRow> {
        match self {
            Self::News(news) => [
                row("Intensity", &news.value),
                row("Source date", &news.source_date),
                row("articlesCount", &news.articles_count),
                row("coveragePct", &news.coverage_pct),
                row("queryTag", &news.query_tag),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Self::FearGreed(fng) => [
                row("FGI", &fng.value),
                row("Class", &fng.classification),
                row("Source date", &fng.source_date),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Self::Fx(fx) => [
                row("EUR/USD", &fx.eur_usd_rate),
                row("Day %", &fx.day_change_pct),
                row("Source date", &fx.source_date),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Self::Weather(weather) => [
                row("Condition", &weather.condition),
                weather
                    .temp_c
                    .as_ref()
                    .map(|temp| EvidenceRow::new("Temp", format!("{}°C", display_value(temp)))),
                row("Source date", &weather.source_date),
            ]
            .into_iter()
            .flatten()
            .collect(),
            Self::Generic(generic) => generic
                .entries
                .iter()
                .map(|(key, value)| EvidenceRow::new(key.as_str(), display_value(value)))
                .collect(),
        }
    }

    /// Free-text notes shown under the rows.
    pub fn notes(&self) -> Vec<String> {
        let notes: [Option<&Value>; 2] = match self {
            Self::News(news) => [news.note.as_ref(), None],
            Self::FearGreed(fng) => [fng.explanation.as_ref(), None],
            Self::Fx(fx) => [fx.note.as_ref(), None],
            Self::Weather(weather) => [weather.note.as_ref(), None],
            Self::Generic(generic) => [generic.explanation.as_ref(), generic.note.as_ref()],
        };

        notes.into_iter().flatten().map(display_value).collect()
    }

    /// Headlines to list on the card, for news schemas only.
    pub fn headlines(&self) -> Option<&[String]> {
        match self {
            Self::News(news) => Some(news.display_headlines()),
            _ => None,
        }
    }

    /// Placeholder text when the card has nothing to show in its body.
    pub fn empty_message(&self) -> Option<&'static str> {
        match self {
            Self::News(news) if news.sample_headlines.is_empty() => Some(NO_HEADLINES_MESSAGE),
            Self::Generic(generic) if generic.is_empty() => Some(NO_EVIDENCE_MESSAGE),
            _ => None,
        }
    }
}

fn row(label: &str, value: &Option<Value>) -> Option<EvidenceRow> {
    value
        .as_ref()
        .map(|value| EvidenceRow::new(label, display_value(value)))
}

struct Fields<'a>(&'a Map<String, Value>);

impl Fields<'_> {
    fn present(&self, key: &str) -> Option<Value> {
        self.0.get(key).filter(|value| !value.is_null()).cloned()
    }

    fn truthy(&self, key: &str) -> Option<Value> {
        self.0.get(key).filter(|value| is_truthy(value)).cloned()
    }

    fn strings(&self, key: &str) -> Vec<String> {
        self.0
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().map(display_value).collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn factor(name: &str, evidence: Value) -> Factor {
        Factor::new(
            name,
            0.5,
            evidence.as_object().cloned().unwrap_or_default(),
        )
    }

    #[test]
    fn dispatches_on_exact_name() {
        assert_eq!(FactorKind::of("News activity"), FactorKind::NewsActivity);
        assert_eq!(FactorKind::of("News intensity"), FactorKind::NewsIntensity);
        assert_eq!(FactorKind::of("Fear & Greed Index"), FactorKind::FearGreedIndex);
        assert_eq!(FactorKind::of("FX context (EUR/USD)"), FactorKind::FxEurUsd);
        assert_eq!(FactorKind::of("Weather risk"), FactorKind::WeatherRisk);
        assert_eq!(FactorKind::of("news activity"), FactorKind::Unregistered);
        assert_eq!(
            FactorKind::of("Market sentiment (Fear & Greed)"),
            FactorKind::Unregistered
        );
    }

    #[test]
    fn news_schema_extracts_fields_and_truncates_headlines() {
        let headlines = (0..25).map(|i| format!("headline {i}")).collect::<Vec<_>>();
        let evidence = FactorEvidence::extract(&factor(
            "News intensity",
            json!({
                "value": 0,
                "sourceDate": "2024-03-01",
                "articlesCount": 42,
                "coveragePct": null,
                "queryTag": "",
                "note": "GDELT sample",
                "sampleHeadlines": headlines,
            }),
        ));

        let FactorEvidence::News(news) = &evidence else {
            panic!("expected news schema");
        };
        assert_eq!(news.sample_headlines.len(), 25);
        assert_eq!(evidence.headlines().map(<[String]>::len), Some(20));
        assert_eq!(
            evidence.rows(),
            vec![
                EvidenceRow::new("Intensity", "0"),
                EvidenceRow::new("Source date", "2024-03-01"),
                EvidenceRow::new("articlesCount", "42"),
            ]
        );
        assert_eq!(evidence.notes(), vec![String::from("GDELT sample")]);
        assert_eq!(evidence.empty_message(), None);
    }

    #[test]
    fn news_without_headlines_says_so() {
        let evidence = FactorEvidence::extract(&factor("News activity", json!({"value": 3})));
        assert_eq!(evidence.headlines(), Some(&[][..]));
        assert_eq!(evidence.empty_message(), Some(NO_HEADLINES_MESSAGE));
    }

    #[test]
    fn fear_greed_schema() {
        let evidence = FactorEvidence::extract(&factor(
            "Fear & Greed Index",
            json!({
                "value": 22,
                "classification": "Extreme Fear",
                "explanation": "Sentiment was washed out."
            }),
        ));

        assert_eq!(
            evidence.rows(),
            vec![
                EvidenceRow::new("FGI", "22"),
                EvidenceRow::new("Class", "Extreme Fear"),
            ]
        );
        assert_eq!(evidence.notes(), vec![String::from("Sentiment was washed out.")]);
    }

    #[test]
    fn fx_schema_keeps_zero_change() {
        let evidence = FactorEvidence::extract(&factor(
            "FX context (EUR/USD)",
            json!({"eurUsdRate": 1.0845, "dayChangePct": 0, "sourceDate": "2024-03-01"}),
        ));

        assert_eq!(
            evidence.rows(),
            vec![
                EvidenceRow::new("EUR/USD", "1.0845"),
                EvidenceRow::new("Day %", "0"),
                EvidenceRow::new("Source date", "2024-03-01"),
            ]
        );
        assert!(evidence.notes().is_empty());
    }

    #[test]
    fn weather_schema_suffixes_temperature() {
        let evidence = FactorEvidence::extract(&factor(
            "Weather risk",
            json!({"condition": "Heatwave", "tempC": 41.5, "note": "Texas grid"}),
        ));

        assert_eq!(
            evidence.rows(),
            vec![
                EvidenceRow::new("Condition", "Heatwave"),
                EvidenceRow::new("Temp", "41.5°C"),
            ]
        );
        assert_eq!(evidence.notes(), vec![String::from("Texas grid")]);
    }

    #[test]
    fn unregistered_name_takes_first_six_entries() {
        let evidence = FactorEvidence::extract(&factor(
            "Macro liquidity",
            json!({"a": 1, "b": 2, "c": 3, "d": 4, "e": 5, "f": 6, "g": 7}),
        ));

        let FactorEvidence::Generic(generic) = &evidence else {
            panic!("expected generic schema");
        };
        let keys = generic
            .entries
            .iter()
            .map(|(key, _)| key.as_str())
            .collect::<Vec<_>>();
        assert_eq!(keys, vec!["a", "b", "c", "d", "e", "f"]);
        assert_eq!(evidence.rows().len(), 6);
        assert_eq!(evidence.empty_message(), None);
    }

    #[test]
    fn generic_schema_surfaces_notes_and_empty_state() {
        let evidence = FactorEvidence::extract(&factor(
            "On-chain flows",
            json!({"explanation": "Exchange inflows rose", "note": "beta"}),
        ));
        assert_eq!(
            evidence.notes(),
            vec![String::from("Exchange inflows rose"), String::from("beta")]
        );

        let empty = FactorEvidence::extract(&factor("On-chain flows", json!({})));
        assert_eq!(empty.empty_message(), Some(NO_EVIDENCE_MESSAGE));
        assert!(empty.rows().is_empty());
    }

    #[test]
    fn serializes_with_schema_tag() {
        let evidence = FactorEvidence::extract(&factor("Weather risk", json!({"tempC": 3})));
        let value = serde_json::to_value(&evidence).expect("must serialize");
        assert_eq!(value["schema"], "weather");
        assert_eq!(value["tempC"], 3);
    }
}
