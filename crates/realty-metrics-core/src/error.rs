use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single hard failure for one raw input field.
///
/// Surfaced to the caller as a list; the validator keeps checking remaining
/// fields after the first failure so one submit reports every mistake.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Invalid input: {field} — {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum RealtyMetricsError {
    #[error("Validation failed with {} error(s)", .0.len())]
    Validation(Vec<ValidationError>),

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Division by zero in {context}")]
    DivisionByZero { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for RealtyMetricsError {
    fn from(e: serde_json::Error) -> Self {
        RealtyMetricsError::SerializationError(e.to_string())
    }
}
