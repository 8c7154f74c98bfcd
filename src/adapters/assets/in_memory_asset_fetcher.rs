//! In-memory asset fetcher for tests and offline runs.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::ports::{AssetFetchError, AssetFetcher, FetchedAsset};

/// Serves pre-registered assets; unknown URLs answer 404.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssetFetcher {
    assets: HashMap<String, FetchedAsset>,
}

impl InMemoryAssetFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, url: impl Into<String>, asset: FetchedAsset) -> Self {
        self.assets.insert(url.into(), asset);
        self
    }
}

#[async_trait]
impl AssetFetcher for InMemoryAssetFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedAsset, AssetFetchError> {
        self.assets
            .get(url)
            .cloned()
            .ok_or(AssetFetchError::Status(404))
    }
}
