//! Document export configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Timeout for downloading the logo embedded in DOCX files.
    #[serde(default = "default_asset_fetch_timeout")]
    pub asset_fetch_timeout_secs: u64,
}

impl ExportConfig {
    pub fn asset_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.asset_fetch_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.asset_fetch_timeout_secs == 0 || self.asset_fetch_timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            asset_fetch_timeout_secs: default_asset_fetch_timeout(),
        }
    }
}

fn default_asset_fetch_timeout() -> u64 {
    10
}
