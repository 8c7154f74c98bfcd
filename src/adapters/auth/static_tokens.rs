//! Static bearer-token session validator.
//!
//! Maps configured API tokens to accounts. The token list comes from
//! configuration as `token:user_id` pairs separated by commas.
//!
//! # Example
//!
//! ```ignore
//! let validator = StaticTokenValidator::parse("s3cret:clerk-1,0ther:clerk-2")?;
//! let user = validator.validate("s3cret").await?;
//! assert_eq!(user.id.as_str(), "clerk-1");
//! ```

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId, ValidationError};
use crate::ports::SessionValidator;

/// Session validator backed by a fixed token table.
#[derive(Debug, Default, Clone)]
pub struct StaticTokenValidator {
    tokens: HashMap<String, AuthenticatedUser>,
}

impl StaticTokenValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses `token:user_id[,token:user_id...]`.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` for entries without a colon or with an empty side.
    pub fn parse(entries: &str) -> Result<Self, ValidationError> {
        let mut validator = Self::new();
        for entry in entries.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (token, user) = entry.split_once(':').ok_or_else(|| {
                ValidationError::invalid_format("api_tokens", "expected token:user_id")
            })?;
            let token = token.trim();
            if token.is_empty() {
                return Err(ValidationError::empty_field("api_tokens.token"));
            }
            let id = UserId::new(user.trim())?;
            validator = validator.with_user(token, id);
        }
        Ok(validator)
    }

    /// Registers a token for an account.
    pub fn with_user(mut self, token: impl Into<String>, id: UserId) -> Self {
        self.tokens.insert(token.into(), AuthenticatedUser::new(id));
        self
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }
}

#[async_trait]
impl SessionValidator for StaticTokenValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.tokens.get(token).cloned().ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_token_pairs() {
        let validator = StaticTokenValidator::parse(" a1:clerk-1 , b2:clerk-2 ,").unwrap();
        assert_eq!(validator.token_count(), 2);
    }

    #[test]
    fn empty_list_yields_no_tokens() {
        assert_eq!(StaticTokenValidator::parse("").unwrap().token_count(), 0);
    }

    #[test]
    fn rejects_malformed_entries() {
        assert!(StaticTokenValidator::parse("no-colon").is_err());
        assert!(StaticTokenValidator::parse(":clerk").is_err());
        assert!(StaticTokenValidator::parse("token: ").is_err());
    }

    #[tokio::test]
    async fn validates_known_tokens() {
        let validator = StaticTokenValidator::parse("a1:clerk-1").unwrap();

        let user = validator.validate("a1").await.unwrap();
        assert_eq!(user.id.as_str(), "clerk-1");
        assert!(matches!(
            validator.validate("zz").await,
            Err(AuthError::InvalidToken)
        ));
    }
}
