use serde::Serialize;
use tracing::debug;

use crate::narrative::compose;
use crate::{Explanation, Factor};

/// Where the displayed narrative came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeOrigin {
    External,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Narrative {
    pub text: String,
    pub origin: NarrativeOrigin,
}

/// Picks the narrative for an explanation using an already parsed factor
/// list. External text is used verbatim when it has any non-blank content.
pub fn display_narrative_with(explanation: &Explanation, factors: &[Factor]) -> Narrative {
    if let Some(text) = explanation.usable_ai_explanation() {
        debug!(event_id = explanation.event_id, "using external narrative");
        return Narrative {
            text: text.to_owned(),
            origin: NarrativeOrigin::External,
        };
    }

    debug!(
        event_id = explanation.event_id,
        factors = factors.len(),
        "composing fallback narrative"
    );
    Narrative {
        text: compose(explanation, factors),
        origin: NarrativeOrigin::Fallback,
    }
}

/// Display narrative for a raw explanation payload.
pub fn display_narrative(explanation: &Explanation) -> Narrative {
    if explanation.usable_ai_explanation().is_some() {
        return display_narrative_with(explanation, &[]);
    }

    display_narrative_with(explanation, &explanation.factors().factors)
}

/// Shorthand for the narrative text alone.
pub fn display_narrative_text(explanation: &Explanation) -> String {
    display_narrative(explanation).text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn explanation(ai: Option<&str>, factors_json: &str) -> Explanation {
        Explanation {
            event_id: 9,
            event_date: String::from("2024-03-01"),
            direction: String::from("DOWN"),
            pct_change: String::from("-5.25"),
            confidence: String::from("MED"),
            summary: String::from("raw summary"),
            ai_explanation: ai.map(str::to_owned),
            ai_source: None,
            ai_model: None,
            factors_json: Some(factors_json.to_owned()),
        }
    }

    #[test]
    fn prefers_external_text_verbatim() {
        let raw = explanation(Some("  Spot ETF outflows.  "), "not json");
        let narrative = display_narrative(&raw);
        assert_eq!(narrative.text, "  Spot ETF outflows.  ");
        assert_eq!(narrative.origin, NarrativeOrigin::External);
    }

    #[test]
    fn blank_external_text_falls_back() {
        for ai in [None, Some(""), Some(" \t\n")] {
            let narrative = display_narrative(&explanation(ai, "[]"));
            assert_eq!(narrative.origin, NarrativeOrigin::Fallback);
            assert!(narrative.text.starts_with("Bitcoin fell 5.25% on 2024-03-01."));
        }
    }

    #[test]
    fn malformed_factors_do_not_escape() {
        let text = display_narrative_text(&explanation(None, "not json"));
        assert!(text.contains("News signals were limited"));
    }
}
