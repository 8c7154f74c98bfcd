//! Resolution repository port.
//!
//! Persists resolutions per owner. Every query is scoped to the owner, so
//! one account can never read or delete another account's resolutions.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ResolutionId, UserId};
use crate::domain::resolution::ResolutionRecord;

/// Filter for listing resolutions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionFilter {
    /// Case-insensitive substring over title and resolution number.
    pub query: Option<String>,
}

impl ResolutionFilter {
    pub fn with_query(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            query: (!query.trim().is_empty()).then_some(query),
        }
    }
}

/// Repository port for stored resolutions.
#[async_trait]
pub trait ResolutionRepository: Send + Sync {
    /// Find one resolution owned by `owner`.
    ///
    /// Returns `None` when it does not exist or belongs to someone else.
    async fn find_by_id(
        &self,
        id: &ResolutionId,
        owner: &UserId,
    ) -> Result<Option<ResolutionRecord>, DomainError>;

    /// Insert or update by `(resolution_number, series_year, owner)`.
    ///
    /// When the slot is taken, the stored record keeps its id and
    /// `created_at`; everything else is replaced. Returns the stored record.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn upsert(&self, record: ResolutionRecord) -> Result<ResolutionRecord, DomainError>;

    /// Replace the record with this id.
    ///
    /// # Errors
    ///
    /// - `ResolutionNotFound` if it does not exist for the owner
    async fn update(&self, record: ResolutionRecord) -> Result<ResolutionRecord, DomainError>;

    /// List an owner's resolutions, newest first.
    async fn list_by_owner(
        &self,
        owner: &UserId,
        filter: &ResolutionFilter,
    ) -> Result<Vec<ResolutionRecord>, DomainError>;

    /// Remove a resolution.
    ///
    /// # Errors
    ///
    /// - `ResolutionNotFound` if it does not exist for the owner
    async fn delete(&self, id: &ResolutionId, owner: &UserId) -> Result<(), DomainError>;
}
