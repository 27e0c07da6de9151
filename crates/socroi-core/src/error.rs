use thiserror::Error;

/// Top-level error type for the SOC ROI estimator.
#[derive(Error, Debug)]
pub enum RoiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration: {field} {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error("Field {field} expects a {expected} value")]
    FieldType {
        field: String,
        expected: &'static str,
    },

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Invalid edit: {0}. Expected FIELD=VALUE")]
    InvalidEdit(String),
}

impl From<config::ConfigError> for RoiError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RoiError>;
