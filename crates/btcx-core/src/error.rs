use thiserror::Error;

/// Validation and contract errors exposed by `btcx-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("date must be a calendar day in YYYY-MM-DD form: '{value}'")]
    InvalidDayKey { value: String },

    #[error("invalid direction '{value}', expected one of UP, DOWN")]
    InvalidDirection { value: String },
    #[error("invalid tier scale '{value}', expected one of factor, confidence")]
    InvalidTierScale { value: String },

    #[error("api base must start with http:// or https://: '{value}'")]
    InvalidApiBase { value: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
