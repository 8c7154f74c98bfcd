//! Who is calling.
//!
//! A `SessionValidator` turns a bearer token into an `AuthenticatedUser`;
//! the domain only ever sees the resulting account id.

use super::UserId;
use thiserror::Error;

/// The account a request acts for. Resolutions and settings are scoped to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: UserId,
}

impl AuthenticatedUser {
    pub fn new(id: UserId) -> Self {
        Self { id }
    }
}

/// Token validation failures.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    /// Unknown or malformed token.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token store could not be consulted.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_wraps_account_id() {
        let user = AuthenticatedUser::new(UserId::new("clerk-1").unwrap());
        assert_eq!(user.id.as_str(), "clerk-1");
    }

    #[test]
    fn auth_error_messages() {
        assert_eq!(AuthError::InvalidToken.to_string(), "Invalid or expired token");
        assert_eq!(
            AuthError::ServiceUnavailable("refused".into()).to_string(),
            "Auth service unavailable: refused"
        );
    }
}
