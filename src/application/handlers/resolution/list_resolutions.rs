//! ListResolutionsHandler - Query handler for the dashboard list.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::resolution::{ResolutionError, ResolutionRecord};
use crate::ports::{ResolutionFilter, ResolutionRepository};

/// Query to list an owner's resolutions.
#[derive(Debug, Clone)]
pub struct ListResolutionsQuery {
    pub owner: UserId,
    /// Search text matched against title and resolution number.
    pub search: Option<String>,
}

impl ListResolutionsQuery {
    pub fn all(owner: UserId) -> Self {
        Self { owner, search: None }
    }

    fn to_filter(&self) -> ResolutionFilter {
        match &self.search {
            Some(text) => ResolutionFilter::with_query(text.clone()),
            None => ResolutionFilter::default(),
        }
    }
}

/// Handler for listing resolutions, newest first.
pub struct ListResolutionsHandler {
    repository: Arc<dyn ResolutionRepository>,
}

impl ListResolutionsHandler {
    pub fn new(repository: Arc<dyn ResolutionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListResolutionsQuery,
    ) -> Result<Vec<ResolutionRecord>, ResolutionError> {
        let filter = query.to_filter();
        Ok(self.repository.list_by_owner(&query.owner, &filter).await?)
    }
}
