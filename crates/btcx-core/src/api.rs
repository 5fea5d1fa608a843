use serde::Serialize;

use crate::ValidationError;

pub const DEFAULT_API_BASE: &str = "http://localhost:8080";
pub const DEFAULT_CHART_DAYS: u32 = 180;
pub const DEFAULT_EVENT_LIMIT: u32 = 100;

/// Location of the explainer backend.
///
/// Injected by the caller; nothing here reads the environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiConfig {
    base_url: String,
    explicit: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_API_BASE),
            explicit: false,
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = base_url.as_ref().trim();
        let has_host = ["http://", "https://"]
            .iter()
            .any(|scheme| trimmed.strip_prefix(scheme).is_some_and(|rest| !rest.is_empty()));
        if !has_host {
            return Err(ValidationError::InvalidApiBase {
                value: base_url.as_ref().to_owned(),
            });
        }

        Ok(Self {
            base_url: trimmed.trim_end_matches('/').to_owned(),
            explicit: true,
        })
    }

    /// Uses `base_url` when given, the local default otherwise.
    pub fn from_optional(base_url: Option<&str>) -> Result<Self, ValidationError> {
        match base_url {
            Some(base_url) => Self::new(base_url),
            None => Ok(Self::default()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `env` when a base was supplied, `localhost` when defaulted.
    pub const fn source_label(&self) -> &'static str {
        if self.explicit {
            "env"
        } else {
            "localhost"
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn chart_url(&self, days: u32) -> String {
        self.url(&chart_path(days))
    }

    pub fn events_url(&self, limit: u32) -> String {
        self.url(&events_path(limit))
    }

    pub fn explain_url(&self, event_id: i64) -> String {
        self.url(&explain_path(event_id))
    }
}

pub fn chart_path(days: u32) -> String {
    format!("/api/chart?days={days}")
}

pub fn events_path(limit: u32) -> String {
    format!("/api/events?limit={limit}")
}

pub fn explain_path(event_id: i64) -> String {
    format!("/api/explain/{event_id}")
}
