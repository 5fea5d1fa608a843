use serde::Serialize;

use crate::aggregate::{display_narrative_with, Narrative};
use crate::evidence::{EvidenceRow, FactorEvidence, FactorKind};
use crate::tier::{factor_tier, score_percent, Tier};
use crate::{Explanation, Factor, FactorsIssue};

/// One factor as shown in the signals list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FactorCard {
    pub name: String,
    pub kind: FactorKind,
    pub tier: Tier,
    pub tier_class: &'static str,
    pub score_label: String,
    pub rows: Vec<EvidenceRow>,
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headlines: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<&'static str>,
    pub evidence: FactorEvidence,
}

impl From<&Factor> for FactorCard {
    fn from(factor: &Factor) -> Self {
        let evidence = FactorEvidence::extract(factor);
        let tier = factor_tier(factor.score);
        Self {
            name: factor.name.clone(),
            kind: FactorKind::of(&factor.name),
            tier,
            tier_class: tier.css_class(),
            score_label: score_percent(factor.score),
            rows: evidence.rows(),
            notes: evidence.notes(),
            headlines: evidence.headlines().map(<[String]>::to_vec),
            empty_message: evidence.empty_message(),
            evidence,
        }
    }
}

/// Badge naming the narrative's producer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceBadge {
    pub label: String,
    pub class_name: String,
}

impl SourceBadge {
    /// Upper-cased `aiSource` (or `FALLBACK`), followed by the model when
    /// one is named.
    pub fn of(explanation: &Explanation) -> Self {
        let source = explanation
            .ai_source
            .as_deref()
            .filter(|source| !source.is_empty())
            .unwrap_or("fallback");
        let mut label = source.to_uppercase();
        if let Some(model) = explanation
            .ai_model
            .as_deref()
            .filter(|model| !model.is_empty())
        {
            label.push_str(" • ");
            label.push_str(model);
        }

        Self {
            label,
            class_name: format!("pill-{}", source.to_lowercase()),
        }
    }
}

/// Compact header line, e.g. `DOWN • -5.25% • conf MED`.
pub fn header_line(explanation: &Explanation) -> String {
    format!(
        "{} • {}% • conf {}",
        explanation.direction, explanation.pct_change, explanation.confidence
    )
}

/// Everything the detail view shows for one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplanationPanel {
    pub event_id: i64,
    pub event_date: String,
    pub header: String,
    pub badge: SourceBadge,
    pub narrative: Narrative,
    pub summary: String,
    pub factors: Vec<FactorCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors_issue: Option<FactorsIssue>,
}

impl ExplanationPanel {
    pub fn build(explanation: &Explanation) -> Self {
        let parsed = explanation.factors();
        Self {
            event_id: explanation.event_id,
            event_date: explanation.event_date.clone(),
            header: header_line(explanation),
            badge: SourceBadge::of(explanation),
            narrative: display_narrative_with(explanation, &parsed.factors),
            summary: explanation.summary.clone(),
            factors: parsed.factors.iter().map(FactorCard::from).collect(),
            factors_issue: parsed.issue,
        }
    }
}
