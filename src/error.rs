//! Error types for the review pipeline

use thiserror::Error;

/// Malformed or missing input. Surfaced to the caller as-is, never defaulted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Invalid date: '{value}'")]
    InvalidDate { value: String },

    #[error("Missing column: '{column}'")]
    MissingColumn { column: String },

    #[error("Invalid {field} at record {record}: '{value}'")]
    InvalidField {
        record: usize,
        field: String,
        value: String,
    },

    #[error("Invalid text ({reason}): '{snippet}'")]
    InvalidText { reason: String, snippet: String },

    #[error("Invalid window size: {0} (must be at least 1)")]
    InvalidWindow(usize),

    #[error("Malformed record {record}: {reason}")]
    MalformedRecord { record: usize, reason: String },
}

#[derive(Error, Debug)]
pub enum VisentifyError {
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("Score out of range: {field} = {value} (expected {min} to {max})")]
    RangeViolation {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: Box<VisentifyError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl VisentifyError {
    /// Wrap an error with the index of the record that produced it
    pub fn at_record(self, index: usize) -> Self {
        VisentifyError::Record {
            index,
            source: Box::new(self),
        }
    }

    /// True when the root cause is malformed input
    pub fn is_input_error(&self) -> bool {
        match self {
            VisentifyError::Input(_) => true,
            VisentifyError::Record { source, .. } => source.is_input_error(),
            _ => false,
        }
    }

    /// True when the root cause is an out-of-range score
    pub fn is_range_violation(&self) -> bool {
        match self {
            VisentifyError::RangeViolation { .. } => true,
            VisentifyError::Record { source, .. } => source.is_range_violation(),
            _ => false,
        }
    }
}

impl From<config::ConfigError> for VisentifyError {
    fn from(err: config::ConfigError) -> Self {
        VisentifyError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VisentifyError>;
