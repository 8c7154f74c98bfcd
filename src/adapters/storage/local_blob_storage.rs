//! Local Filesystem Blob Storage - Implementation of BlobStorage.
//!
//! Stores uploaded images under a per-owner directory and returns a public
//! URL below a configured base. File names are content-addressed, so
//! uploading the same image twice yields the same URL.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::info;

use crate::domain::foundation::UserId;
use crate::ports::{BlobStorage, UploadError, ValidatedUpload};

/// Local filesystem storage for public images.
///
/// # Directory Structure
///
/// ```text
/// {base_path}/
/// └── {owner}/
///     ├── logo-3f2a9c0d1e4b5a6f.png
///     └── signature-9a8b7c6d5e4f3a2b.webp
/// ```
///
/// Writes go to a `.tmp` file that is renamed into place once flushed.
#[derive(Debug, Clone)]
pub struct LocalBlobStorage {
    base_path: PathBuf,
    public_base_url: String,
}

impl LocalBlobStorage {
    /// # Arguments
    ///
    /// * `base_path` - Root directory for stored images
    /// * `public_base_url` - URL prefix under which `base_path` is served
    pub fn new(base_path: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Directory name for an owner; anything outside `[A-Za-z0-9_-]` becomes `_`.
    fn owner_segment(owner: &UserId) -> String {
        owner
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    /// `{kind}-{first 16 hex chars of SHA-256}.{ext}`
    fn file_name(upload: &ValidatedUpload) -> String {
        let digest = hex::encode(Sha256::digest(upload.bytes()));
        format!(
            "{}-{}.{}",
            upload.kind(),
            &digest[..16],
            upload.image_type().extension()
        )
    }
}

#[async_trait]
impl BlobStorage for LocalBlobStorage {
    async fn upload(&self, owner: &UserId, upload: &ValidatedUpload) -> Result<String, UploadError> {
        let segment = Self::owner_segment(owner);
        let dir = self.base_path.join(&segment);
        fs::create_dir_all(&dir).await.map_err(|e| {
            UploadError::storage(format!("Failed to create directory {}: {}", dir.display(), e))
        })?;

        let file_name = Self::file_name(upload);
        let final_path = dir.join(&file_name);
        let temp_path = dir.join(format!("{}.tmp", file_name));

        let mut file = fs::File::create(&temp_path)
            .await
            .map_err(|e| UploadError::storage(format!("Failed to create file: {}", e)))?;
        file.write_all(upload.bytes())
            .await
            .map_err(|e| UploadError::storage(format!("Failed to write file: {}", e)))?;
        file.sync_all()
            .await
            .map_err(|e| UploadError::storage(format!("Failed to sync file: {}", e)))?;
        drop(file);

        fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| UploadError::storage(format!("Failed to move file into place: {}", e)))?;

        let url = format!("{}/{}/{}", self.public_base_url, segment, file_name);
        info!(owner = %owner, kind = %upload.kind(), bytes = upload.bytes().len(), %url, "Image stored");
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{AssetKind, UploadPolicy, UploadRequest};
    use tempfile::TempDir;

    fn upload(kind: AssetKind, bytes: &[u8]) -> ValidatedUpload {
        UploadPolicy::default()
            .validate(UploadRequest {
                kind,
                content_type: "image/png".into(),
                bytes: bytes.to_vec(),
            })
            .unwrap()
    }

    #[tokio::test]
    async fn stores_file_and_returns_public_url() {
        let dir = TempDir::new().unwrap();
        let storage = LocalBlobStorage::new(dir.path(), "http://localhost:8080/uploads/");
        let owner = UserId::new("clerk-1").unwrap();

        let url = storage
            .upload(&owner, &upload(AssetKind::Logo, b"png-bytes"))
            .await
            .unwrap();

        assert!(url.starts_with("http://localhost:8080/uploads/clerk-1/logo-"));
        assert!(url.ends_with(".png"));
        let file_name = url.rsplit('/').next().unwrap();
        let stored = std::fs::read(dir.path().join("clerk-1").join(file_name)).unwrap();
        assert_eq!(stored, b"png-bytes");
    }

    #[tokio::test]
    async fn identical_content_gets_identical_url() {
        let dir = TempDir::new().unwrap();
        let storage = LocalBlobStorage::new(dir.path(), "http://x");
        let owner = UserId::new("clerk").unwrap();

        let a = storage.upload(&owner, &upload(AssetKind::Signature, b"same")).await.unwrap();
        let b = storage.upload(&owner, &upload(AssetKind::Signature, b"same")).await.unwrap();
        let c = storage.upload(&owner, &upload(AssetKind::Signature, b"different")).await.unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[tokio::test]
    async fn no_temp_files_remain() {
        let dir = TempDir::new().unwrap();
        let storage = LocalBlobStorage::new(dir.path(), "http://x");
        let owner = UserId::new("clerk").unwrap();
        storage.upload(&owner, &upload(AssetKind::Logo, b"img")).await.unwrap();

        let leftovers: Vec<_> = std::fs::read_dir(dir.path().join("clerk"))
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn owner_segment_cannot_escape_base_dir() {
        let owner = UserId::new("../../etc").unwrap();
        assert_eq!(LocalBlobStorage::owner_segment(&owner), "______etc");
    }
}
