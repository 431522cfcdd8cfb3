use crate::error::*;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::Record(e) => {
                error!("Record error details: {:?}", e);
            }
            CoreError::Filter(e) => {
                error!("Filter error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::Record(e) => e.user_friendly_message(),
            CoreError::Filter(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Io(_) => {
                "Could not read the sentiment data. Please check the file.".to_string()
            }
            CoreError::Serialization(_) => {
                "Sentiment data is not valid JSON. Please check the export.".to_string()
            }
            CoreError::NotFound { resource } => format!("Could not find: {}", resource),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::Record(_) => "RECORD".to_string(),
            CoreError::Filter(_) => "FILTER".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::NotFound { .. } => "NOT_FOUND".to_string(),
        }
    }
}

impl ErrorExt for RecordError {
    fn log_error(&self) -> &Self {
        error!("RecordError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("RecordError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            RecordError::InvalidTimestamp { id, .. } => format!(
                "Article {} has an invalid date and cannot be charted.",
                id
            ),
            RecordError::ScoreOutOfRange { id, .. } => format!(
                "Article {} has a sentiment score outside the -1 to 1 range.",
                id
            ),
            RecordError::MissingField { id, field } => {
                format!("Article {} is missing its {}.", id, field)
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            RecordError::InvalidTimestamp { .. } => "RECORD_INVALID_TIMESTAMP".to_string(),
            RecordError::ScoreOutOfRange { .. } => "RECORD_SCORE_OUT_OF_RANGE".to_string(),
            RecordError::MissingField { .. } => "RECORD_MISSING_FIELD".to_string(),
        }
    }
}

impl ErrorExt for FilterError {
    fn log_error(&self) -> &Self {
        error!("FilterError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("FilterError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            FilterError::InvalidDate { field, .. } => {
                format!("The {} is not a valid date. Use YYYY-MM-DD.", field)
            }
            FilterError::InvertedRange { .. } => {
                "The start date must not be after the end date.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            FilterError::InvalidDate { .. } => "FILTER_INVALID_DATE".to_string(),
            FilterError::InvertedRange { .. } => "FILTER_INVERTED_RANGE".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => {
                "Configuration file not found. Please check the path.".to_string()
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::ValidationFailed { reason } => {
                format!("Configuration is invalid: {}.", reason)
            }
            ConfigError::Parse(_) => {
                "Configuration file format is invalid. Please check the settings.".to_string()
            }
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::ValidationFailed { .. } => "CONFIG_VALIDATION_FAILED".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

pub struct ErrorReporter {
    report_errors: bool,
    report_warnings: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            report_errors: true,
            report_warnings: true,
        }
    }

    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    pub fn with_warning_reporting(mut self, enabled: bool) -> Self {
        self.report_warnings = enabled;
        self
    }

    pub fn report_error(&self, error: &CoreError) {
        if self.report_errors {
            error.log_error();
            info!("Error code: {}", error.error_code());
            info!("User message: {}", error.user_friendly_message());
        }
    }

    pub fn report_warning(&self, error: &CoreError) {
        if self.report_warnings {
            error.log_warn();
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
