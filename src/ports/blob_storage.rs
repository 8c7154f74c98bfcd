//! Blob Storage Port - public image uploads (logos and signatures).
//!
//! Uploads are checked by `UploadPolicy` before any adapter sees them. The
//! only way to build a `ValidatedUpload` is through the policy, so a storage
//! adapter cannot be handed unchecked bytes.

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::domain::foundation::UserId;

/// Default upload ceiling: 2 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

/// What an uploaded image is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Logo,
    Signature,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Logo => "logo",
            AssetKind::Signature => "signature",
        }
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AssetKind {
    type Err = UploadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "logo" => Ok(AssetKind::Logo),
            "signature" => Ok(AssetKind::Signature),
            other => Err(UploadError::validation(format!("unknown asset kind '{}'", other))),
        }
    }
}

/// Accepted image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    Png,
    Jpeg,
    Webp,
    Svg,
}

impl ImageType {
    /// Parses a MIME type, ignoring parameters such as `; charset=`.
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        match essence.as_str() {
            "image/png" => Some(ImageType::Png),
            "image/jpeg" | "image/jpg" => Some(ImageType::Jpeg),
            "image/webp" => Some(ImageType::Webp),
            "image/svg+xml" => Some(ImageType::Svg),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ImageType::Png => "image/png",
            ImageType::Jpeg => "image/jpeg",
            ImageType::Webp => "image/webp",
            ImageType::Svg => "image/svg+xml",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ImageType::Png => "png",
            ImageType::Jpeg => "jpg",
            ImageType::Webp => "webp",
            ImageType::Svg => "svg",
        }
    }
}

/// Raw upload as received.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub kind: AssetKind,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// An upload that passed `UploadPolicy::validate`.
#[derive(Debug, Clone)]
pub struct ValidatedUpload {
    kind: AssetKind,
    image_type: ImageType,
    bytes: Vec<u8>,
}

impl ValidatedUpload {
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    pub fn image_type(&self) -> ImageType {
        self.image_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Type and size rules for uploads.
#[derive(Debug, Clone, Copy)]
pub struct UploadPolicy {
    pub max_bytes: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl UploadPolicy {
    pub fn new(max_bytes: usize) -> Self {
        Self { max_bytes }
    }

    /// Accepts png, jpeg, webp, and svg images up to `max_bytes`.
    pub fn validate(&self, request: UploadRequest) -> Result<ValidatedUpload, UploadError> {
        let image_type = ImageType::from_mime(&request.content_type).ok_or_else(|| {
            UploadError::validation(format!(
                "unsupported content type '{}'; use PNG, JPEG, WebP, or SVG",
                request.content_type
            ))
        })?;
        if request.bytes.is_empty() {
            return Err(UploadError::validation("file is empty"));
        }
        if request.bytes.len() > self.max_bytes {
            return Err(UploadError::validation(format!(
                "file is {} bytes; the limit is {} bytes",
                request.bytes.len(),
                self.max_bytes
            )));
        }
        Ok(ValidatedUpload {
            kind: request.kind,
            image_type,
            bytes: request.bytes,
        })
    }
}

/// Errors from uploads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UploadError {
    /// The upload was rejected before reaching storage.
    #[error("Upload rejected: {0}")]
    Validation(String),

    /// The storage backend failed.
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl UploadError {
    pub fn validation(reason: impl Into<String>) -> Self {
        Self::Validation(reason.into())
    }

    pub fn storage(reason: impl Into<String>) -> Self {
        Self::Storage(reason.into())
    }
}

/// Port for storing public images.
#[async_trait]
pub trait BlobStorage: Send + Sync {
    /// Store the image and return its public URL.
    async fn upload(&self, owner: &UserId, upload: &ValidatedUpload) -> Result<String, UploadError>;
}
