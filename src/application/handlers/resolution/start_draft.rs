//! StartDraftHandler - Query handler for opening a new resolution form.

use std::sync::Arc;

use super::source::profile_or_default;
use crate::application::EditingSession;
use crate::domain::foundation::UserId;
use crate::domain::resolution::{ResolutionDraft, ResolutionError};
use crate::ports::OrgProfileRepository;

/// Query for a fresh draft.
#[derive(Debug, Clone)]
pub struct StartDraftQuery {
    pub owner: UserId,
    /// Defaults to the current year.
    pub series_year: Option<i32>,
}

/// A blank draft prefilled from the owner's settings.
#[derive(Debug, Clone)]
pub struct StartDraftResult {
    pub draft: ResolutionDraft,
    /// Names offered as movant and seconder.
    pub officials: Vec<String>,
}

/// Handler for new drafts.
pub struct StartDraftHandler {
    profiles: Arc<dyn OrgProfileRepository>,
}

impl StartDraftHandler {
    pub fn new(profiles: Arc<dyn OrgProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, query: StartDraftQuery) -> Result<StartDraftResult, ResolutionError> {
        let profile = profile_or_default(self.profiles.as_ref(), &query.owner).await?;

        let draft = query
            .series_year
            .map(ResolutionDraft::blank)
            .unwrap_or_default();
        let mut session = EditingSession::new(draft);
        session.apply_org_defaults(&profile);

        Ok(StartDraftResult {
            draft: session.into_draft(),
            officials: profile.official_names(),
        })
    }
}
