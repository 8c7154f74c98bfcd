//! In-Memory Resolution Repository
//!
//! Keeps resolutions in a map guarded by a tokio `RwLock`. Used by the
//! binary when no database is configured, and by tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ResolutionId, UserId};
use crate::domain::resolution::ResolutionRecord;
use crate::ports::{ResolutionFilter, ResolutionRepository};

/// In-memory storage for resolutions.
#[derive(Debug, Clone, Default)]
pub struct InMemoryResolutionRepository {
    records: Arc<RwLock<HashMap<ResolutionId, ResolutionRecord>>>,
}

impl InMemoryResolutionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records across all owners.
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

fn not_found(id: &ResolutionId) -> DomainError {
    DomainError::new(ErrorCode::ResolutionNotFound, "Resolution not found")
        .with_detail("id", id.to_string())
}

#[async_trait]
impl ResolutionRepository for InMemoryResolutionRepository {
    async fn find_by_id(
        &self,
        id: &ResolutionId,
        owner: &UserId,
    ) -> Result<Option<ResolutionRecord>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(id).filter(|r| &r.owner == owner).cloned())
    }

    async fn upsert(&self, mut record: ResolutionRecord) -> Result<ResolutionRecord, DomainError> {
        let mut records = self.records.write().await;

        let existing = records
            .values()
            .find(|stored| stored.same_slot(&record))
            .map(|stored| (stored.id, stored.created_at));
        if let Some((id, created_at)) = existing {
            record.id = id;
            record.created_at = created_at;
        }

        records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, record: ResolutionRecord) -> Result<ResolutionRecord, DomainError> {
        let mut records = self.records.write().await;
        match records.get(&record.id) {
            Some(stored) if stored.owner == record.owner => {
                let mut record = record;
                record.created_at = stored.created_at;
                records.insert(record.id, record.clone());
                Ok(record)
            }
            _ => Err(not_found(&record.id)),
        }
    }

    async fn list_by_owner(
        &self,
        owner: &UserId,
        filter: &ResolutionFilter,
    ) -> Result<Vec<ResolutionRecord>, DomainError> {
        let records = self.records.read().await;
        let mut matches: Vec<ResolutionRecord> = records
            .values()
            .filter(|r| &r.owner == owner)
            .filter(|r| filter.query.as_deref().map_or(true, |q| r.matches_query(q)))
            .cloned()
            .collect();
        matches.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matches)
    }

    async fn delete(&self, id: &ResolutionId, owner: &UserId) -> Result<(), DomainError> {
        let mut records = self.records.write().await;
        match records.get(id) {
            Some(stored) if &stored.owner == owner => {
                records.remove(id);
                Ok(())
            }
            _ => Err(not_found(id)),
        }
    }
}
