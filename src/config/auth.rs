//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::auth::StaticTokenValidator;

/// Static bearer tokens.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// `token:user_id` pairs, comma-separated.
    #[serde(default)]
    pub api_tokens: String,
}

impl AuthConfig {
    /// Builds the validator for the configured tokens.
    pub fn validator(&self) -> Result<StaticTokenValidator, ValidationError> {
        StaticTokenValidator::parse(&self.api_tokens)
            .map_err(|e| ValidationError::InvalidApiTokens(e.to_string()))
    }

    /// Validate authentication configuration
    ///
    /// Outside production an empty token list is allowed; every API call is
    /// then rejected with 401.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let validator = self.validator()?;
        if *environment == Environment::Production && validator.token_count() == 0 {
            return Err(ValidationError::NoApiTokens);
        }
        Ok(())
    }
}
