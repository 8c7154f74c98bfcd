//! DeleteResolutionHandler - Command handler for removing a resolution.
//!
//! Deletion is permanent, so the caller must echo back the word `delete`.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{ErrorCode, ResolutionId, UserId};
use crate::domain::resolution::ResolutionError;
use crate::ports::ResolutionRepository;

/// Word the user must type to confirm deletion (case-insensitive).
pub const DELETE_CONFIRMATION: &str = "delete";

/// Command to delete a resolution.
#[derive(Debug, Clone)]
pub struct DeleteResolutionCommand {
    pub owner: UserId,
    pub resolution_id: ResolutionId,
    pub confirmation: String,
}

/// Handler for deleting resolutions.
pub struct DeleteResolutionHandler {
    repository: Arc<dyn ResolutionRepository>,
}

impl DeleteResolutionHandler {
    pub fn new(repository: Arc<dyn ResolutionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: DeleteResolutionCommand) -> Result<(), ResolutionError> {
        if !cmd.confirmation.trim().eq_ignore_ascii_case(DELETE_CONFIRMATION) {
            return Err(ResolutionError::ConfirmationRequired);
        }

        self.repository
            .delete(&cmd.resolution_id, &cmd.owner)
            .await
            .map_err(|e| {
                if e.code == ErrorCode::ResolutionNotFound {
                    ResolutionError::not_found(cmd.resolution_id)
                } else {
                    e.into()
                }
            })?;

        info!(resolution_id = %cmd.resolution_id, owner = %cmd.owner, "Resolution deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryResolutionRepository;
    use crate::domain::foundation::Timestamp;
    use crate::domain::resolution::{ResolutionDraft, ResolutionRecord, ResolutionStatus};

    async fn seeded() -> (Arc<InMemoryResolutionRepository>, ResolutionId, UserId) {
        let repo = Arc::new(InMemoryResolutionRepository::new());
        let owner = UserId::new("clerk").unwrap();
        let saved = repo
            .upsert(ResolutionRecord::from_draft(
                owner.clone(),
                ResolutionDraft::blank(2025),
                ResolutionStatus::Draft,
                Timestamp::now(),
            ))
            .await
            .unwrap();
        (repo, saved.id, owner)
    }

    fn command(id: ResolutionId, owner: &UserId, confirmation: &str) -> DeleteResolutionCommand {
        DeleteResolutionCommand {
            owner: owner.clone(),
            resolution_id: id,
            confirmation: confirmation.to_string(),
        }
    }

    #[tokio::test]
    async fn requires_typed_confirmation() {
        let (repo, id, owner) = seeded().await;
        let handler = DeleteResolutionHandler::new(repo.clone());

        for wrong in ["", "yes", "delet", "remove"] {
            assert_eq!(
                handler.handle(command(id, &owner, wrong)).await,
                Err(ResolutionError::ConfirmationRequired)
            );
        }
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn confirmation_is_case_insensitive() {
        let (repo, id, owner) = seeded().await;
        let handler = DeleteResolutionHandler::new(repo.clone());

        handler.handle(command(id, &owner, " DELETE ")).await.unwrap();
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn other_owners_get_not_found() {
        let (repo, id, _) = seeded().await;
        let handler = DeleteResolutionHandler::new(repo);
        let intruder = UserId::new("intruder").unwrap();

        assert_eq!(
            handler.handle(command(id, &intruder, "delete")).await,
            Err(ResolutionError::NotFound(id))
        );
    }
}
