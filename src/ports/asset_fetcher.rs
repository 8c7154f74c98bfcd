//! Asset Fetcher Port - downloads images embedded in exported documents.

use async_trait::async_trait;
use thiserror::Error;

/// Bytes of a fetched image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedAsset {
    pub bytes: Vec<u8>,
    /// Content type reported by the server, if any.
    pub content_type: Option<String>,
}

impl FetchedAsset {
    pub fn new(bytes: Vec<u8>, content_type: Option<String>) -> Self {
        Self {
            bytes,
            content_type,
        }
    }

    /// Extension to use inside a document package, for the image types a
    /// DOCX can embed (`png`, `jpeg`, `gif`).
    ///
    /// A declared type wins; without one the magic bytes decide. `None` for
    /// anything else, such as webp or svg.
    pub fn extension(&self) -> Option<&'static str> {
        let declared = self
            .content_type
            .as_deref()
            .map(|ct| ct.split(';').next().unwrap_or("").trim().to_lowercase())
            .filter(|ct| ct.starts_with("image/"));
        if let Some(declared) = declared {
            return match declared.as_str() {
                "image/png" => Some("png"),
                "image/jpeg" | "image/jpg" => Some("jpeg"),
                "image/gif" => Some("gif"),
                _ => None,
            };
        }
        if self.bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
            Some("png")
        } else if self.bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some("jpeg")
        } else if self.bytes.starts_with(b"GIF8") {
            Some("gif")
        } else {
            None
        }
    }
}

/// Asset fetch errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AssetFetchError {
    #[error("invalid asset URL: {0}")]
    InvalidUrl(String),

    #[error("asset request failed with status {0}")]
    Status(u16),

    #[error("asset request failed: {0}")]
    Network(String),

    #[error("asset host not allowed: {0}")]
    NotAllowed(String),

    #[error("asset is not an image: {0}")]
    NotAnImage(String),

    #[error("asset exceeds {limit} bytes")]
    TooLarge { limit: usize },
}

/// Port for fetching remote images by URL.
#[async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedAsset, AssetFetchError>;
}
