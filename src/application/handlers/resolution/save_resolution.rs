//! SaveResolutionHandler - Command handler for saving drafts.
//!
//! A draft without an id is upserted on `(resolution_number, series_year,
//! owner)`, so saving a number that already exists overwrites that record.
//! A draft with an id updates that record.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{ErrorCode, ResolutionId, Timestamp, UserId};
use crate::domain::resolution::{
    ResolutionDraft, ResolutionError, ResolutionRecord, ResolutionStatus,
};
use crate::ports::ResolutionRepository;

/// Command to save a draft.
#[derive(Debug, Clone)]
pub struct SaveResolutionCommand {
    pub owner: UserId,
    /// Set when the draft was loaded from (or already saved to) storage.
    pub resolution_id: Option<ResolutionId>,
    pub draft: ResolutionDraft,
}

/// Handler for saving drafts.
pub struct SaveResolutionHandler {
    repository: Arc<dyn ResolutionRepository>,
}

impl SaveResolutionHandler {
    pub fn new(repository: Arc<dyn ResolutionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: SaveResolutionCommand,
    ) -> Result<ResolutionRecord, ResolutionError> {
        // 1. Validate every field
        cmd.draft.validate()?;

        // 2. Build the stored form; saving always resets status to draft
        let mut record = ResolutionRecord::from_draft(
            cmd.owner,
            cmd.draft,
            ResolutionStatus::Draft,
            Timestamp::now(),
        );

        // 3. Persist
        let saved = match cmd.resolution_id {
            Some(id) => {
                record.id = id;
                self.repository.update(record).await.map_err(|e| {
                    if e.code == ErrorCode::ResolutionNotFound {
                        ResolutionError::not_found(id)
                    } else {
                        e.into()
                    }
                })?
            }
            None => self.repository.upsert(record).await?,
        };

        info!(
            resolution_id = %saved.id,
            owner = %saved.owner,
            number = %saved.resolution_number,
            series_year = saved.series_year,
            "Resolution saved"
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryResolutionRepository;
    use crate::domain::resolution::{Signatory, SignatoryRole};

    fn owner() -> UserId {
        UserId::new("clerk-1").unwrap()
    }

    fn valid_draft(number: &str, title: &str) -> ResolutionDraft {
        let mut draft = ResolutionDraft::blank(2025);
        draft.title = title.to_string();
        draft.resolution_number = number.to_string();
        draft.whereas_clauses = vec!["the district must replace old meters".into()];
        draft.resolved_clauses = vec!["to approve the replacement".into()];
        draft.signatories = vec![Signatory::new(
            "Juan Dela Cruz",
            "BOD Chairman",
            SignatoryRole::Chairman,
        )];
        draft
    }

    fn command(id: Option<ResolutionId>, draft: ResolutionDraft) -> SaveResolutionCommand {
        SaveResolutionCommand {
            owner: owner(),
            resolution_id: id,
            draft,
        }
    }

    #[tokio::test]
    async fn saves_new_draft_with_draft_status() {
        let repo = Arc::new(InMemoryResolutionRepository::new());
        let handler = SaveResolutionHandler::new(repo.clone());

        let saved = handler
            .handle(command(None, valid_draft("012", "Approving the meters")))
            .await
            .unwrap();

        assert_eq!(saved.status, ResolutionStatus::Draft);
        assert_eq!(saved.owner, owner());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_before_storage() {
        let repo = Arc::new(InMemoryResolutionRepository::new());
        let handler = SaveResolutionHandler::new(repo.clone());

        let err = handler
            .handle(command(None, ResolutionDraft::blank(2025)))
            .await
            .unwrap_err();

        match err {
            ResolutionError::ValidationFailed(errors) => {
                let fields: Vec<&str> = errors.iter().map(|e| e.field()).collect();
                assert!(fields.contains(&"title"));
                assert!(fields.contains(&"resolutionNumber"));
                assert!(fields.contains(&"signatories"));
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn same_number_and_year_overwrites() {
        let repo = Arc::new(InMemoryResolutionRepository::new());
        let handler = SaveResolutionHandler::new(repo.clone());

        let first = handler
            .handle(command(None, valid_draft("012", "First version")))
            .await
            .unwrap();
        let second = handler
            .handle(command(None, valid_draft("012", "Second version")))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn saving_with_id_updates_that_record() {
        let repo = Arc::new(InMemoryResolutionRepository::new());
        let handler = SaveResolutionHandler::new(repo.clone());
        let first = handler
            .handle(command(None, valid_draft("012", "First version")))
            .await
            .unwrap();

        let renumbered = handler
            .handle(command(Some(first.id), valid_draft("013", "Renumbered")))
            .await
            .unwrap();

        assert_eq!(renumbered.id, first.id);
        assert_eq!(renumbered.resolution_number, "013");
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn saving_with_unknown_id_is_not_found() {
        let handler = SaveResolutionHandler::new(Arc::new(InMemoryResolutionRepository::new()));
        let id = ResolutionId::new();

        let err = handler
            .handle(command(Some(id), valid_draft("012", "Orphaned draft")))
            .await
            .unwrap_err();

        assert_eq!(err, ResolutionError::NotFound(id));
    }
}
