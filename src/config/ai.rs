//! Gemini drafting settings.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Longest accepted per-call timeout for the model.
pub const MAX_AI_TIMEOUT_SECS: u64 = 300;

/// Most retries allowed after a transient model failure.
pub const MAX_AI_RETRIES: u32 = 5;

/// How the drafting assistant reaches Gemini.
///
/// Without a key, development runs draft with the canned mock and every
/// other environment answers drafting requests with 503.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(default)]
    pub gemini_api_key: Option<Secret<String>>,

    #[serde(default = "default_model")]
    pub model: String,

    /// Scheme and host of the Generative Language API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_retries")]
    pub max_retries: u32,
}

impl AiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// A key is present and not blank.
    pub fn has_gemini(&self) -> bool {
        match &self.gemini_api_key {
            Some(key) => !key.expose_secret().trim().is_empty(),
            None => false,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.base_url.as_str();
        if !url.starts_with("https://") && !url.starts_with("http://") {
            return Err(ValidationError::InvalidUrl {
                field: "ai.base_url",
                value: self.base_url.clone(),
            });
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_AI_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_retries > MAX_AI_RETRIES {
            return Err(ValidationError::TooManyRetries);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: default_retries(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_retries() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed(key: &str) -> AiConfig {
        AiConfig {
            gemini_api_key: Some(Secret::new(key.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_target_flash_without_key() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(!config.has_gemini());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn whitespace_key_is_no_key() {
        assert!(!keyed(" \t").has_gemini());
        assert!(keyed("AIza-test").has_gemini());
    }

    #[test]
    fn base_url_needs_http_scheme() {
        let config = AiConfig {
            base_url: "generativelanguage.googleapis.com".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidUrl { field: "ai.base_url", .. })
        ));
    }

    #[test]
    fn blank_model_is_missing() {
        let config = AiConfig {
            model: " ".into(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn limits_on_timeout_and_retries() {
        let slow = AiConfig {
            timeout_secs: MAX_AI_TIMEOUT_SECS + 1,
            ..Default::default()
        };
        assert!(matches!(slow.validate(), Err(ValidationError::InvalidTimeout)));

        let stubborn = AiConfig {
            max_retries: MAX_AI_RETRIES + 1,
            ..Default::default()
        };
        assert!(matches!(
            stubborn.validate(),
            Err(ValidationError::TooManyRetries)
        ));
    }
}
