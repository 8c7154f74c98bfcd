//! Runtime settings for the resolution builder.
//!
//! Everything comes from `RESOLUTION_BUILDER__*` environment variables (a
//! `.env` file is read first when present). Nested keys are joined with a
//! double underscore, so `RESOLUTION_BUILDER__STORAGE__BLOB_DIR` sets
//! `storage.blob_dir`.
//!
//! ```no_run
//! use resolution_builder::config::AppConfig;
//!
//! let config = AppConfig::load()?;
//! config.validate()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod ai;
mod auth;
mod error;
mod export;
mod server;
mod storage;

pub use ai::AiConfig;
pub use auth::AuthConfig;
pub use error::{ConfigError, ValidationError};
pub use export::ExportConfig;
pub use server::{Environment, ServerConfig};
pub use storage::StorageConfig;

use serde::Deserialize;

/// Every section, each defaulted so an empty environment runs in development.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ai: AiConfig,

    /// Uploaded logos and signatures.
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "RESOLUTION_BUILDER";

impl AppConfig {
    /// Reads `.env` (if any) and the process environment.
    ///
    /// # Errors
    ///
    /// `ConfigError::LoadError` when a variable cannot be parsed into its field.
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(ConfigError::DotEnv(e.to_string()));
            }
        }

        let source = config::Environment::with_prefix(ENV_PREFIX).separator("__");
        let loaded = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(loaded)
    }

    /// Checks sections in order and stops at the first problem.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.storage.validate()?;
        self.auth.validate(&self.server.environment)?;
        self.export.validate()
    }

    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: &[&str] = &[
        "RESOLUTION_BUILDER__SERVER__PORT",
        "RESOLUTION_BUILDER__SERVER__ENVIRONMENT",
        "RESOLUTION_BUILDER__AI__GEMINI_API_KEY",
        "RESOLUTION_BUILDER__AI__MODEL",
        "RESOLUTION_BUILDER__STORAGE__BLOB_DIR",
        "RESOLUTION_BUILDER__STORAGE__MAX_UPLOAD_BYTES",
        "RESOLUTION_BUILDER__AUTH__API_TOKENS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn empty_environment_is_a_runnable_development_setup() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert!(!config.ai.has_gemini());
        assert_eq!(config.storage.max_upload_bytes, 2 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn nested_variables_reach_their_sections() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("RESOLUTION_BUILDER__SERVER__PORT", "3000");
        env::set_var("RESOLUTION_BUILDER__AI__GEMINI_API_KEY", "AIza-test");
        env::set_var("RESOLUTION_BUILDER__AI__MODEL", "gemini-2.0-pro");
        env::set_var("RESOLUTION_BUILDER__STORAGE__BLOB_DIR", "/var/lib/uploads");
        env::set_var("RESOLUTION_BUILDER__AUTH__API_TOKENS", "t1:clerk-1");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.ai.has_gemini());
        assert_eq!(config.ai.model, "gemini-2.0-pro");
        assert_eq!(config.storage.blob_dir.to_str(), Some("/var/lib/uploads"));
        assert_eq!(config.auth.validator().unwrap().token_count(), 1);
    }

    #[test]
    fn production_requires_api_tokens() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("RESOLUTION_BUILDER__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
        assert!(matches!(config.validate(), Err(ValidationError::NoApiTokens)));
    }

    #[test]
    fn unparseable_number_is_a_load_error() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("RESOLUTION_BUILDER__STORAGE__MAX_UPLOAD_BYTES", "lots");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
