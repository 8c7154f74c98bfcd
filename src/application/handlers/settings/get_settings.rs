//! GetSettingsHandler - Query handler for the organization profile.

use std::sync::Arc;

use super::SettingsError;
use crate::domain::foundation::UserId;
use crate::domain::organization::OrgProfile;
use crate::ports::OrgProfileRepository;

/// Query for an owner's settings.
#[derive(Debug, Clone)]
pub struct GetSettingsQuery {
    pub owner: UserId,
}

/// Handler returning the profile, or an empty one for new accounts.
pub struct GetSettingsHandler {
    profiles: Arc<dyn OrgProfileRepository>,
}

impl GetSettingsHandler {
    pub fn new(profiles: Arc<dyn OrgProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, query: GetSettingsQuery) -> Result<OrgProfile, SettingsError> {
        Ok(self
            .profiles
            .find_by_owner(&query.owner)
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryOrgProfileRepository;

    #[tokio::test]
    async fn new_accounts_get_an_empty_profile() {
        let handler = GetSettingsHandler::new(Arc::new(InMemoryOrgProfileRepository::new()));
        let profile = handler
            .handle(GetSettingsQuery {
                owner: UserId::new("clerk").unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(profile, OrgProfile::default());
    }
}
