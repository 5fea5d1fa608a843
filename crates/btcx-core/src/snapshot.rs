//! Readers for already-fetched endpoint payloads.

use crate::{CoreError, Explanation, MoveEvent, PricePoint};

/// Chart endpoint payload: a date-ordered list of points.
pub fn parse_chart(payload: &str) -> Result<Vec<PricePoint>, CoreError> {
    Ok(serde_json::from_str(payload)?)
}

/// Events endpoint payload.
pub fn parse_events(payload: &str) -> Result<Vec<MoveEvent>, CoreError> {
    Ok(serde_json::from_str(payload)?)
}

/// Explain endpoint payload for a single event.
pub fn parse_explanation(payload: &str) -> Result<Explanation, CoreError> {
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_chart_payload() {
        let chart = parse_chart(
            r#"[{"date":"2024-01-01","open":"1","high":"2","low":"0.5","close":"1.5"}]"#,
        )
        .expect("must parse");
        assert_eq!(chart.len(), 1);
        assert_eq!(chart[0].close, "1.5");
    }

    #[test]
    fn reports_serialization_errors() {
        let err = parse_events("{").expect_err("must fail");
        assert!(matches!(err, CoreError::Serialization(_)));
    }

    #[test]
    fn explanation_without_optional_fields() {
        let explanation = parse_explanation(
            r#"{"eventId":4,"eventDate":"2024-03-01","direction":"DOWN","pctChange":"-5.25"}"#,
        )
        .expect("must parse");
        assert_eq!(explanation.confidence, "");
        assert_eq!(explanation.factors_json, None);
        assert_eq!(explanation.ai_explanation, None);
    }
}
