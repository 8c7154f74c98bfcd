//! HTTP asset fetcher using reqwest.
//!
//! Only URLs under the configured prefixes are fetched, redirects are not
//! followed, and the body is read in chunks against a byte cap.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{redirect, Client};
use std::time::Duration;
use tracing::debug;

use crate::ports::{AssetFetchError, AssetFetcher, FetchedAsset};

/// Downloads images over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpAssetFetcher {
    client: Client,
    max_bytes: usize,
    allowed_prefixes: Vec<String>,
}

impl HttpAssetFetcher {
    /// # Errors
    ///
    /// `Network` when the HTTP client cannot be built.
    pub fn new(timeout: Duration, max_bytes: usize) -> Result<Self, AssetFetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| AssetFetchError::Network(e.to_string()))?;
        Ok(Self {
            client,
            max_bytes,
            allowed_prefixes: Vec::new(),
        })
    }

    /// Restrict fetches to URLs under `prefix`. With no prefixes any
    /// http(s) URL is fetched.
    pub fn allow_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into().trim_end_matches('/').to_string();
        self.allowed_prefixes.push(prefix);
        self
    }

    fn is_allowed(&self, url: &str) -> bool {
        if self.allowed_prefixes.is_empty() {
            return true;
        }
        self.allowed_prefixes.iter().any(|prefix| {
            url.strip_prefix(prefix.as_str())
                .map_or(false, |rest| rest.is_empty() || rest.starts_with('/'))
        })
    }
}

#[async_trait]
impl AssetFetcher for HttpAssetFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedAsset, AssetFetchError> {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(AssetFetchError::InvalidUrl(url.to_string()));
        }
        if !self.is_allowed(url) {
            return Err(AssetFetchError::NotAllowed(url.to_string()));
        }

        let mut response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AssetFetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetFetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .unwrap_or_default();
        if !content_type.trim().to_ascii_lowercase().starts_with("image/") {
            return Err(AssetFetchError::NotAnImage(content_type));
        }

        let limit = self.max_bytes;
        if response.content_length().map_or(false, |len| len > limit as u64) {
            return Err(AssetFetchError::TooLarge { limit });
        }

        let mut bytes = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| AssetFetchError::Network(e.to_string()))?
        {
            if bytes.len() + chunk.len() > limit {
                return Err(AssetFetchError::TooLarge { limit });
            }
            bytes.extend_from_slice(&chunk);
        }

        debug!(url, bytes = bytes.len(), "Fetched asset");
        Ok(FetchedAsset::new(bytes, Some(content_type)))
    }
}
