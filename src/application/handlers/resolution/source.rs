//! Shared loading for handlers that render a resolution.

use std::sync::Arc;

use thiserror::Error;

use crate::application::EditingSession;
use crate::domain::foundation::{ResolutionId, UserId};
use crate::domain::organization::OrgProfile;
use crate::domain::resolution::{ResolutionDraft, ResolutionError};
use crate::ports::{ExportError, OrgProfileRepository, ResolutionRepository};

/// Where a preview or export takes its draft from.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// Unsaved form contents.
    Draft(ResolutionDraft),
    /// A stored resolution owned by the caller.
    Stored(ResolutionId),
}

/// Errors from preview and export.
#[derive(Debug, Error)]
pub enum RenderResolutionError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Loads drafts and the owner's branding.
#[derive(Clone)]
pub(super) struct DraftLoader {
    resolutions: Arc<dyn ResolutionRepository>,
    profiles: Arc<dyn OrgProfileRepository>,
}

impl DraftLoader {
    pub(super) fn new(
        resolutions: Arc<dyn ResolutionRepository>,
        profiles: Arc<dyn OrgProfileRepository>,
    ) -> Self {
        Self {
            resolutions,
            profiles,
        }
    }

    pub(super) async fn session(
        &self,
        owner: &UserId,
        source: DocumentSource,
    ) -> Result<EditingSession, ResolutionError> {
        match source {
            DocumentSource::Draft(draft) => Ok(EditingSession::new(draft)),
            DocumentSource::Stored(id) => {
                let record = self
                    .resolutions
                    .find_by_id(&id, owner)
                    .await?
                    .ok_or_else(|| ResolutionError::not_found(id))?;
                Ok(EditingSession::from_record(&record))
            }
        }
    }

    pub(super) async fn profile(&self, owner: &UserId) -> Result<OrgProfile, ResolutionError> {
        profile_or_default(self.profiles.as_ref(), owner).await
    }
}

/// The owner's profile, or an empty one when settings were never saved.
pub(super) async fn profile_or_default(
    profiles: &dyn OrgProfileRepository,
    owner: &UserId,
) -> Result<OrgProfile, ResolutionError> {
    Ok(profiles.find_by_owner(owner).await?.unwrap_or_default())
}
