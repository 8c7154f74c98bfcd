//! Resolution-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ResolutionId, ValidationError};

/// Errors surfaced by resolution commands and queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// Resolution was not found for this owner.
    NotFound(ResolutionId),
    /// One or more fields failed validation.
    ValidationFailed(Vec<ValidationError>),
    /// A destructive action was requested without the typed confirmation.
    ConfirmationRequired,
    /// A drafting request is already running for this session.
    GenerationInProgress,
    /// Storage or another collaborator failed.
    Infrastructure(String),
}

impl ResolutionError {
    pub fn not_found(id: ResolutionId) -> Self {
        ResolutionError::NotFound(id)
    }
    pub fn validation(errors: Vec<ValidationError>) -> Self {
        ResolutionError::ValidationFailed(errors)
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        ResolutionError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            ResolutionError::NotFound(_) => ErrorCode::ResolutionNotFound,
            ResolutionError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            ResolutionError::ConfirmationRequired => ErrorCode::ConfirmationRequired,
            ResolutionError::GenerationInProgress => ErrorCode::GenerationInProgress,
            ResolutionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            ResolutionError::NotFound(id) => format!("Resolution not found: {}", id),
            ResolutionError::ValidationFailed(errors) => {
                format!("Validation failed for {} field(s)", errors.len())
            }
            ResolutionError::ConfirmationRequired => {
                "Type 'delete' to confirm removal".to_string()
            }
            ResolutionError::GenerationInProgress => {
                "A draft is already being generated".to_string()
            }
            ResolutionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for ResolutionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ResolutionError {}

impl From<DomainError> for ResolutionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => {
                let field = err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string());
                ResolutionError::ValidationFailed(vec![ValidationError::invalid_format(
                    field,
                    err.message,
                )])
            }
            _ => ResolutionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<Vec<ValidationError>> for ResolutionError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ResolutionError::ValidationFailed(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_reports_id_and_code() {
        let id = ResolutionId::new();
        let err = ResolutionError::not_found(id);
        assert_eq!(err.code(), ErrorCode::ResolutionNotFound);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn domain_validation_error_keeps_field() {
        let err: ResolutionError = DomainError::validation("title", "too short").into();
        match err {
            ResolutionError::ValidationFailed(errors) => assert_eq!(errors[0].field(), "title"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn other_domain_errors_become_infrastructure() {
        let err: ResolutionError = DomainError::new(ErrorCode::DatabaseError, "down").into();
        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert_eq!(err.to_string(), "Error: [DATABASE_ERROR] down");
    }
}
