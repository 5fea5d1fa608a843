use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

/// Headlines considered when theming a news factor.
pub const THEME_HEADLINE_LIMIT: usize = 6;

/// Coarse topic assigned to a batch of headlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Theme {
    EtfFlows,
    Liquidations,
    AnalystCommentary,
    Security,
    General,
}

impl Theme {
    pub const fn label(self) -> &'static str {
        match self {
            Self::EtfFlows => "ETF flows",
            Self::Liquidations => "liquidations and derivatives positioning",
            Self::AnalystCommentary => "analyst/institutional commentary",
            Self::Security => "security topics",
            Self::General => "general crypto market developments",
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Theme {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

// Rules fire independently; output order follows this table.
const RULES: [(Theme, &[&str]); 4] = [
    (Theme::EtfFlows, &["etf"]),
    (Theme::Liquidations, &["liquidat"]),
    (Theme::AnalystCommentary, &["analyst", "bernstein", "strategy"]),
    (Theme::Security, &["quantum", "wallet"]),
];

/// Classifies headlines into themes by keyword.
///
/// Only the first [`THEME_HEADLINE_LIMIT`] headlines are read. The result is
/// never empty: with no keyword hit it is `[Theme::General]`. Callers decide
/// separately what to say when there are no headlines at all.
pub fn detect_themes<S: AsRef<str>>(headlines: &[S]) -> Vec<Theme> {
    let text = headlines
        .iter()
        .take(THEME_HEADLINE_LIMIT)
        .map(AsRef::<str>::as_ref)
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let themes = RULES
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|keyword| text.contains(keyword)))
        .map(|(theme, _)| *theme)
        .collect::<Vec<_>>();

    if themes.is_empty() {
        vec![Theme::General]
    } else {
        themes
    }
}

/// Joins theme labels for narrative text.
pub fn theme_list(themes: &[Theme]) -> String {
    themes
        .iter()
        .map(|theme| theme.label())
        .collect::<Vec<_>>()
        .join(", ")
}
