//! Error body shared by every endpoint.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{FieldViolation, ValidationError};

/// JSON error body: `{ "code", "message", "details"? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    /// One entry per failed field in `details`.
    pub fn validation(errors: &[ValidationError]) -> Self {
        let violations: Vec<FieldViolation> = errors.iter().map(FieldViolation::from).collect();
        Self {
            code: "VALIDATION_FAILED".to_string(),
            message: format!("Validation failed for {} field(s)", errors.len()),
            details: serde_json::to_value(violations).ok(),
        }
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}
