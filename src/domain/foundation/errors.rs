//! Error vocabulary shared by the domain.
//!
//! `ValidationError` describes one bad form field; `DomainError` carries a
//! stable `ErrorCode` out of repositories and other collaborators.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// One form field that failed a rule.
///
/// Field names use the wire (camelCase) spelling, with an index suffix for
/// list entries, e.g. `whereasClauses[2]` or `signatories[0].name`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    EmptyField { field: String },

    #[error("{field} must be from {min} to {max} (was {actual})")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("{field} must be {min} to {max} characters long (was {actual})")]
    InvalidLength {
        field: String,
        min: usize,
        max: usize,
        actual: usize,
    },

    #[error("{field} needs at least {min} characters (was {actual})")]
    TooShort {
        field: String,
        min: usize,
        actual: usize,
    },

    #[error("{field}: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField { field: field.into() }
    }

    /// Numeric value outside `min..=max`.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        Self::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Text length outside `min..=max` characters.
    pub fn invalid_length(field: impl Into<String>, min: usize, max: usize, actual: usize) -> Self {
        Self::InvalidLength {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    pub fn too_short(field: impl Into<String>, min: usize, actual: usize) -> Self {
        Self::TooShort {
            field: field.into(),
            min,
            actual,
        }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            Self::EmptyField { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidLength { field, .. }
            | Self::TooShort { field, .. }
            | Self::InvalidFormat { field, .. } => field,
        }
    }
}

/// `{ "field", "message" }` entry of a 422 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl From<&ValidationError> for FieldViolation {
    fn from(err: &ValidationError) -> Self {
        Self {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

/// Stable codes for collaborator failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ValidationFailed,
    ResolutionNotFound,
    ConfirmationRequired,
    GenerationInProgress,
    DatabaseError,
    StorageError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationFailed => "VALIDATION_FAILED",
            Self::ResolutionNotFound => "RESOLUTION_NOT_FOUND",
            Self::ConfirmationRequired => "CONFIRMATION_REQUIRED",
            Self::GenerationInProgress => "GENERATION_IN_PROGRESS",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::StorageError => "STORAGE_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure reported by a port, with string details for logs.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// A rejected field; the name lands in `details["field"]`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message).with_detail("field", field)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}
