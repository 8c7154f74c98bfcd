//! UploadAssetHandler - Command handler for logo and signature uploads.
//!
//! Returns the public URL only; the caller stores it in the profile when the
//! settings form is saved.

use std::sync::Arc;

use super::SettingsError;
use crate::domain::foundation::UserId;
use crate::ports::{AssetKind, BlobStorage, UploadPolicy, UploadRequest};

/// Command to upload one image.
#[derive(Debug, Clone)]
pub struct UploadAssetCommand {
    pub owner: UserId,
    pub request: UploadRequest,
}

/// Where the image ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadAssetResult {
    pub kind: AssetKind,
    pub url: String,
}

/// Handler that checks uploads against the policy before storing them.
pub struct UploadAssetHandler {
    storage: Arc<dyn BlobStorage>,
    policy: UploadPolicy,
}

impl UploadAssetHandler {
    pub fn new(storage: Arc<dyn BlobStorage>, policy: UploadPolicy) -> Self {
        Self { storage, policy }
    }

    pub async fn handle(&self, cmd: UploadAssetCommand) -> Result<UploadAssetResult, SettingsError> {
        let upload = self.policy.validate(cmd.request)?;
        let url = self.storage.upload(&cmd.owner, &upload).await?;
        Ok(UploadAssetResult {
            kind: upload.kind(),
            url,
        })
    }
}
