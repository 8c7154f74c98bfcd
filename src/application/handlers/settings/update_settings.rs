//! UpdateSettingsHandler - Command handler for saving the organization profile.

use std::sync::Arc;

use tracing::info;

use super::SettingsError;
use crate::domain::foundation::UserId;
use crate::domain::organization::OrgProfile;
use crate::ports::OrgProfileRepository;

/// Command to replace an owner's settings.
#[derive(Debug, Clone)]
pub struct UpdateSettingsCommand {
    pub owner: UserId,
    pub profile: OrgProfile,
}

/// Handler for saving settings.
pub struct UpdateSettingsHandler {
    profiles: Arc<dyn OrgProfileRepository>,
}

impl UpdateSettingsHandler {
    pub fn new(profiles: Arc<dyn OrgProfileRepository>) -> Self {
        Self { profiles }
    }

    pub async fn handle(&self, cmd: UpdateSettingsCommand) -> Result<OrgProfile, SettingsError> {
        cmd.profile.validate()?;
        self.profiles.upsert(&cmd.owner, cmd.profile.clone()).await?;
        info!(owner = %cmd.owner, "Organization settings saved");
        Ok(cmd.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryOrgProfileRepository;
    use crate::domain::organization::RoleDefault;

    fn complete_profile() -> OrgProfile {
        let mut profile = OrgProfile::default();
        profile.water_district_name = Some("Metro Water District".into());
        profile.address = Some("Rizal St., Tagum City, Davao del Norte".into());
        profile.water_district_email = Some("info@metrowd.gov.ph".into());
        profile.roster.chairman = Some(RoleDefault::named("Juan Dela Cruz"));
        profile.roster.vice_chairman = Some(RoleDefault::named("Pedro Penduko"));
        profile.roster.secretary = Some(RoleDefault::named("Ana Reyes"));
        profile.roster.member_1 = Some(RoleDefault::named("Jose Rizal"));
        profile.roster.member_2 = Some(RoleDefault::named("Andres Bonifacio"));
        profile.roster.general_manager = Some(RoleDefault::named("Maria Santos"));
        profile
    }

    #[tokio::test]
    async fn stores_valid_profile() {
        let repo = Arc::new(InMemoryOrgProfileRepository::new());
        let handler = UpdateSettingsHandler::new(repo.clone());
        let owner = UserId::new("clerk").unwrap();

        handler
            .handle(UpdateSettingsCommand {
                owner: owner.clone(),
                profile: complete_profile(),
            })
            .await
            .unwrap();

        let stored = repo.find_by_owner(&owner).await.unwrap().unwrap();
        assert_eq!(stored.district_name(), Some("Metro Water District"));
    }

    #[tokio::test]
    async fn rejects_bad_email_without_storing() {
        let repo = Arc::new(InMemoryOrgProfileRepository::new());
        let handler = UpdateSettingsHandler::new(repo.clone());
        let owner = UserId::new("clerk").unwrap();
        let mut profile = complete_profile();
        profile.water_district_email = Some("not-an-email".into());

        let err = handler
            .handle(UpdateSettingsCommand {
                owner: owner.clone(),
                profile,
            })
            .await
            .unwrap_err();

        match err {
            SettingsError::ValidationFailed(errors) => {
                assert_eq!(errors[0].field(), "water_district_email")
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert!(repo.find_by_owner(&owner).await.unwrap().is_none());
    }
}
