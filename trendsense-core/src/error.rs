use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Record error: {0}")]
    Record(#[from] RecordError),

    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },
}

/// Violations of the [`SentimentRecord`](crate::SentimentRecord) invariants.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("Record {id} has an unparseable timestamp: {value:?}")]
    InvalidTimestamp { id: String, value: String },

    #[error("Record {id} has a sentiment score outside [-1, 1]: {score}")]
    ScoreOutOfRange { id: String, score: f64 },

    #[error("Record {id} is missing required field: {field}")]
    MissingField { id: String, field: String },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid date for {field}: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },

    #[error("Start date {start} is after end date {end}")]
    InvertedRange { start: String, end: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
