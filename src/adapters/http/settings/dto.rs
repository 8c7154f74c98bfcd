//! Request and response bodies for settings endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::settings::UploadAssetResult;
use crate::domain::organization::OrgProfile;

/// Query string for `POST /api/settings/uploads`.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadParams {
    /// `logo` or `signature`.
    pub kind: String,
}

/// The stored profile plus the names selectable as movant and seconder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    #[serde(flatten)]
    pub profile: OrgProfile,
    pub officials: Vec<String>,
}

impl From<OrgProfile> for SettingsResponse {
    fn from(profile: OrgProfile) -> Self {
        Self {
            officials: profile.official_names(),
            profile,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub kind: String,
    pub url: String,
}

impl From<UploadAssetResult> for UploadResponse {
    fn from(result: UploadAssetResult) -> Self {
        Self {
            kind: result.kind.to_string(),
            url: result.url,
        }
    }
}
