//! Core contracts for btcx.
//!
//! This crate contains:
//! - Domain models for price points, move events and explanations
//! - Date correlation between a price series and its events
//! - Headline theming, score tiers and factor evidence extraction
//! - The deterministic fallback narrative and its aggregation
//! - Response envelope and injected API configuration

pub mod aggregate;
pub mod api;
pub mod correlate;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod evidence;
pub mod narrative;
pub mod panel;
pub mod snapshot;
pub mod themes;
pub mod tier;
pub mod value;

pub use aggregate::{
    display_narrative, display_narrative_text, display_narrative_with, Narrative, NarrativeOrigin,
};
pub use api::{ApiConfig, DEFAULT_API_BASE, DEFAULT_CHART_DAYS, DEFAULT_EVENT_LIMIT};
pub use correlate::{correlate, markers, CorrelatedPoint, Marker};
pub use domain::{
    check_series, close_series, event_rows, find_factor, parse_factors, ClosePoint, DayKey,
    Direction, EventRow, Explanation, Factor, FactorsIssue, MoveClass, MoveEvent, ParsedFactors,
    PricePoint, SeriesIssue, SeverityColor,
};
pub use envelope::{Envelope, EnvelopeMeta, SCHEMA_VERSION};
pub use error::{CoreError, ValidationError};
pub use evidence::{EvidenceRow, FactorEvidence, FactorKind};
pub use narrative::compose;
pub use snapshot::{parse_chart, parse_events, parse_explanation};
pub use panel::{header_line, ExplanationPanel, FactorCard, SourceBadge};
pub use themes::{detect_themes, Theme};
pub use tier::{confidence_tier, factor_tier, score_percent, Tier, TierScale};
