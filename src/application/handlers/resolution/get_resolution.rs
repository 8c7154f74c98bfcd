//! GetResolutionHandler - Query handler for loading one resolution.

use std::sync::Arc;

use crate::domain::foundation::{ResolutionId, UserId};
use crate::domain::resolution::{ResolutionError, ResolutionRecord};
use crate::ports::ResolutionRepository;

/// Query for a single resolution.
#[derive(Debug, Clone)]
pub struct GetResolutionQuery {
    pub owner: UserId,
    pub resolution_id: ResolutionId,
}

/// Handler for loading a resolution.
pub struct GetResolutionHandler {
    repository: Arc<dyn ResolutionRepository>,
}

impl GetResolutionHandler {
    pub fn new(repository: Arc<dyn ResolutionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetResolutionQuery) -> Result<ResolutionRecord, ResolutionError> {
        self.repository
            .find_by_id(&query.resolution_id, &query.owner)
            .await?
            .ok_or_else(|| ResolutionError::not_found(query.resolution_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryResolutionRepository;
    use crate::domain::foundation::Timestamp;
    use crate::domain::resolution::{ResolutionDraft, ResolutionStatus};

    #[tokio::test]
    async fn returns_owned_record() {
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
        let handler = GetResolutionHandler::new(repo);

        let found = handler
            .handle(GetResolutionQuery {
                owner,
                resolution_id: saved.id,
            })
            .await
            .unwrap();
        assert_eq!(found.id, saved.id);

        let err = handler
            .handle(GetResolutionQuery {
                owner: UserId::new("someone-else").unwrap(),
                resolution_id: saved.id,
            })
            .await
            .unwrap_err();
        assert_eq!(err, ResolutionError::NotFound(saved.id));
    }
}
