//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, authentication types, and the error
//! vocabulary shared by every resolution builder module.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use errors::{DomainError, ErrorCode, FieldViolation, ValidationError};
pub use ids::{ResolutionId, UserId};
pub use timestamp::Timestamp;
