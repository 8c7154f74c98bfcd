//! In-Memory Organization Profile Repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::organization::OrgProfile;
use crate::ports::OrgProfileRepository;

/// One profile per owner, held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrgProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, OrgProfile>>>,
}

impl InMemoryOrgProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a profile (test setup).
    pub async fn with_profile(self, owner: UserId, profile: OrgProfile) -> Self {
        self.profiles.write().await.insert(owner, profile);
        self
    }
}

#[async_trait]
impl OrgProfileRepository for InMemoryOrgProfileRepository {
    async fn find_by_owner(&self, owner: &UserId) -> Result<Option<OrgProfile>, DomainError> {
        Ok(self.profiles.read().await.get(owner).cloned())
    }

    async fn upsert(&self, owner: &UserId, profile: OrgProfile) -> Result<(), DomainError> {
        self.profiles.write().await.insert(owner.clone(), profile);
        Ok(())
    }
}
