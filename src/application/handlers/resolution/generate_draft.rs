//! GenerateDraftHandler - Command handler for AI-assisted drafting.
//!
//! Sends the clerk's request, with the district name and address as
//! context, to the drafting service and merges the suggestion into the
//! current draft. One request per owner may run at a time.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tracing::{error, info};

use super::source::profile_or_default;
use crate::application::EditingSession;
use crate::domain::foundation::UserId;
use crate::domain::resolution::{ResolutionDraft, ResolutionError};
use crate::ports::{DraftRequest, DraftSuggestion, DraftingError, DraftingService, OrgProfileRepository};

/// Command to draft a resolution from a prompt.
#[derive(Debug, Clone)]
pub struct GenerateDraftCommand {
    pub owner: UserId,
    pub prompt: String,
    /// Form contents to merge into. `None` starts from a new draft with the
    /// owner's default signatories.
    pub draft: Option<ResolutionDraft>,
}

/// Result of a successful drafting request.
#[derive(Debug, Clone)]
pub struct GenerateDraftResult {
    /// What the model proposed.
    pub suggestion: DraftSuggestion,
    /// The draft after merging.
    pub draft: ResolutionDraft,
}

/// Errors from drafting.
#[derive(Debug, Error)]
pub enum GenerateDraftError {
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Drafting(#[from] DraftingError),
}

/// Handler for drafting requests.
pub struct GenerateDraftHandler {
    drafting: Arc<dyn DraftingService>,
    profiles: Arc<dyn OrgProfileRepository>,
    in_flight: Arc<Mutex<HashSet<UserId>>>,
}

impl GenerateDraftHandler {
    pub fn new(
        drafting: Arc<dyn DraftingService>,
        profiles: Arc<dyn OrgProfileRepository>,
    ) -> Self {
        Self {
            drafting,
            profiles,
            in_flight: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub async fn handle(
        &self,
        cmd: GenerateDraftCommand,
    ) -> Result<GenerateDraftResult, GenerateDraftError> {
        let _slot = InFlightSlot::claim(&self.in_flight, &cmd.owner)?;

        let profile = profile_or_default(self.profiles.as_ref(), &cmd.owner).await?;
        let context = profile.drafting_context();
        let request = DraftRequest::new(&cmd.prompt, context.as_deref())?;

        let mut session = match cmd.draft {
            Some(draft) => EditingSession::new(draft),
            None => {
                let mut session = EditingSession::default();
                session.apply_org_defaults(&profile);
                session
            }
        };

        session.begin_generation()?;
        let outcome = self.drafting.generate(request).await;
        session.finish_generation(outcome.clone()).map_err(|e| {
            error!(owner = %cmd.owner, error = %e, "Drafting failed");
            e
        })?;
        let suggestion = outcome?;

        info!(owner = %cmd.owner, "Draft generated");
        Ok(GenerateDraftResult {
            suggestion,
            draft: session.into_draft(),
        })
    }
}

/// Marks an owner as drafting until dropped.
struct InFlightSlot {
    owners: Arc<Mutex<HashSet<UserId>>>,
    owner: UserId,
}

impl InFlightSlot {
    fn claim(owners: &Arc<Mutex<HashSet<UserId>>>, owner: &UserId) -> Result<Self, ResolutionError> {
        let mut set = owners.lock().unwrap_or_else(PoisonError::into_inner);
        if !set.insert(owner.clone()) {
            return Err(ResolutionError::GenerationInProgress);
        }
        Ok(Self {
            owners: Arc::clone(owners),
            owner: owner.clone(),
        })
    }
}

impl Drop for InFlightSlot {
    fn drop(&mut self) {
        self.owners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.owner);
    }
}
