//! Deterministic fallback narrative.
//!
//! Used when an explanation carries no externally generated text. The output
//! depends only on the explanation and its own factor list.

use serde_json::Value;

use crate::themes::{detect_themes, theme_list, THEME_HEADLINE_LIMIT};
use crate::value::{display_value, is_truthy, to_fixed};
use crate::{find_factor, Direction, Explanation, Factor};

pub const SENTIMENT_FACTOR: &str = "Market sentiment (Fear & Greed)";
pub const NEWS_FACTOR: &str = "News activity";
pub const FX_FACTOR: &str = "FX context (EUR/USD)";

const LIMITED_NEWS_SENTENCE: &str = "News signals were limited for this exact date, so the move \
may have been driven more by technical trading and short-term positioning.";

/// Builds the fallback paragraph for `explanation`.
pub fn compose(explanation: &Explanation, factors: &[Factor]) -> String {
    let mut sentences = vec![move_sentence(explanation)];
    sentences.extend(sentiment_sentence(factors));
    sentences.push(news_sentence(factors));
    sentences.extend(fx_sentence(factors));
    sentences.push(format!(
        "Confidence is {}, so treat this as an educational, correlation-based summary rather \
than advice.",
        explanation.confidence
    ));

    collapse_whitespace(&sentences.join(" "))
}

fn move_sentence(explanation: &Explanation) -> String {
    let verb = match explanation.direction() {
        Some(direction) => direction.verb(),
        None => Direction::Down.verb(),
    };
    let pct = to_fixed(explanation.pct_value().abs(), 2);

    format!("Bitcoin {verb} {pct}% on {}.", explanation.event_date)
}

fn sentiment_sentence(factors: &[Factor]) -> Option<String> {
    let sentiment = find_factor(factors, SENTIMENT_FACTOR)?;
    let classification = sentiment
        .evidence
        .get("classification")
        .filter(|value| is_truthy(value))?;
    let value = sentiment.field("value")?;

    Some(format!(
        "The Fear & Greed index sat in the \"{}\" range (value {}), which suggests a cautious \
backdrop.",
        display_value(classification),
        display_value(value)
    ))
}

/// Up to [`THEME_HEADLINE_LIMIT`] headlines of the news factor.
pub fn theme_headlines(factors: &[Factor]) -> Vec<String> {
    find_factor(factors, NEWS_FACTOR)
        .and_then(|news| news.evidence.get("sampleHeadlines"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .take(THEME_HEADLINE_LIMIT)
                .map(display_value)
                .collect()
        })
        .unwrap_or_default()
}

fn news_sentence(factors: &[Factor]) -> String {
    let headlines = theme_headlines(factors);
    if headlines.is_empty() {
        return String::from(LIMITED_NEWS_SENTENCE);
    }

    format!(
        "News discussion around the date leaned toward {}.",
        theme_list(&detect_themes(&headlines))
    )
}

fn fx_sentence(factors: &[Factor]) -> Option<String> {
    // A change of exactly 0 is dropped along with missing values.
    let change = find_factor(factors, FX_FACTOR)?
        .evidence
        .get("dayChangePct")
        .filter(|value| is_truthy(value))?;

    Some(format!(
        "EUR/USD moved {}% on the day, which can slightly influence broader risk sentiment.",
        display_value(change)
    ))
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map};

    use super::*;

    fn explanation(direction: &str, pct: &str, confidence: &str) -> Explanation {
        Explanation {
            event_id: 1,
            event_date: String::from("2024-03-01"),
            direction: direction.to_owned(),
            pct_change: pct.to_owned(),
            confidence: confidence.to_owned(),
            summary: String::new(),
            ai_explanation: None,
            ai_source: None,
            ai_model: None,
            factors_json: None,
        }
    }

    fn factor(name: &str, evidence: Value) -> Factor {
        Factor::new(name, 0.5, evidence.as_object().cloned().unwrap_or_else(Map::new))
    }

    #[test]
    fn minimal_down_move() {
        let text = compose(&explanation("DOWN", "-5.25", "MED"), &[]);
        assert_eq!(
            text,
            "Bitcoin fell 5.25% on 2024-03-01. News signals were limited for this exact date, so \
the move may have been driven more by technical trading and short-term positioning. Confidence \
is MED, so treat this as an educational, correlation-based summary rather than advice."
        );
    }

    #[test]
    fn full_narrative_in_sentence_order() {
        let factors = vec![
            factor("FX context (EUR/USD)", json!({"dayChangePct": -0.42})),
            factor(
                "News activity",
                json!({"sampleHeadlines": ["ETF approval expected", "Whale liquidations spike"]}),
            ),
            factor(
                "Market sentiment (Fear & Greed)",
                json!({"classification": "Fear", "value": 28}),
            ),
        ];

        let text = compose(&explanation("UP", "7", "HIGH"), &factors);
        assert_eq!(
            text,
            "Bitcoin rose 7.00% on 2024-03-01. The Fear & Greed index sat in the \"Fear\" range \
(value 28), which suggests a cautious backdrop. News discussion around the date leaned toward \
ETF flows, liquidations and derivatives positioning. EUR/USD moved -0.42% on the day, which can \
slightly influence broader risk sentiment. Confidence is HIGH, so treat this as an educational, \
correlation-based summary rather than advice."
        );
    }

    #[test]
    fn zero_fx_change_is_suppressed() {
        let factors = vec![factor("FX context (EUR/USD)", json!({"dayChangePct": 0}))];
        let text = compose(&explanation("UP", "3.1", "LOW"), &factors);
        assert!(!text.contains("EUR/USD"));
    }

    #[test]
    fn sentiment_needs_both_fields() {
        let factors = vec![factor(
            "Market sentiment (Fear & Greed)",
            json!({"classification": "Greed", "value": null}),
        )];
        let text = compose(&explanation("UP", "3.1", "LOW"), &factors);
        assert!(!text.contains("Fear & Greed index"));
    }

    #[test]
    fn sentiment_value_of_zero_still_counts() {
        let factors = vec![factor(
            "Market sentiment (Fear & Greed)",
            json!({"classification": "Extreme Fear", "value": 0}),
        )];
        let text = compose(&explanation("DOWN", "-3.1", "LOW"), &factors);
        assert!(text.contains("sat in the \"Extreme Fear\" range (value 0)"));
    }

    #[test]
    fn empty_headlines_fall_back_to_limited_news() {
        let factors = vec![factor("News activity", json!({"sampleHeadlines": []}))];
        let text = compose(&explanation("DOWN", "-3.1", "LOW"), &factors);
        assert!(text.contains(LIMITED_NEWS_SENTENCE));
        assert!(!text.contains("leaned toward"));
    }

    #[test]
    fn news_intensity_is_not_used_for_theming() {
        let factors = vec![factor(
            "News intensity",
            json!({"sampleHeadlines": ["ETF approval expected"]}),
        )];
        let text = compose(&explanation("DOWN", "-3.1", "LOW"), &factors);
        assert!(text.contains(LIMITED_NEWS_SENTENCE));
    }

    #[test]
    fn unknown_direction_reads_as_fell_and_whitespace_collapses() {
        let text = compose(&explanation("FLAT", "2", "  MED \n"), &[]);
        assert!(text.starts_with("Bitcoin fell 2.00% on 2024-03-01."));
        assert!(text.contains("Confidence is MED , so"));
        assert!(!text.contains("  "));
    }

    #[test]
    fn halfway_percentages_round_up() {
        let text = compose(&explanation("DOWN", "-3.125", "MED"), &[]);
        assert!(text.starts_with("Bitcoin fell 3.13% on 2024-03-01."));
    }

    #[test]
    fn padded_direction_is_not_up() {
        let text = compose(&explanation(" UP ", "4", "MED"), &[]);
        assert!(text.starts_with("Bitcoin fell 4.00% on 2024-03-01."));
    }

    #[test]
    fn compose_is_deterministic() {
        let factors = vec![factor(
            "News activity",
            json!({"sampleHeadlines": ["Quantum wallet scare", "analyst upgrade"]}),
        )];
        let first = compose(&explanation("UP", "4.5", "MED"), &factors);
        let second = compose(&explanation("UP", "4.5", "MED"), &factors);
        assert_eq!(first, second);
    }
}
