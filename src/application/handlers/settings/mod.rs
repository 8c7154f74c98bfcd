//! Organization settings handlers.

mod get_settings;
mod update_settings;
mod upload_asset;

pub use get_settings::{GetSettingsHandler, GetSettingsQuery};
pub use update_settings::{UpdateSettingsCommand, UpdateSettingsHandler};
pub use upload_asset::{UploadAssetCommand, UploadAssetHandler, UploadAssetResult};

use thiserror::Error;

use crate::domain::foundation::{DomainError, ValidationError};
use crate::ports::UploadError;

/// Errors from settings commands and queries.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Validation failed for {} field(s)", .0.len())]
    ValidationFailed(Vec<ValidationError>),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Storage(#[from] DomainError),
}

impl From<Vec<ValidationError>> for SettingsError {
    fn from(errors: Vec<ValidationError>) -> Self {
        SettingsError::ValidationFailed(errors)
    }
}
