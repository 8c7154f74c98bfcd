//! Uploaded image storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::ports::DEFAULT_MAX_UPLOAD_BYTES;

/// Hard ceiling on the configurable upload limit.
const MAX_UPLOAD_CEILING: usize = 20 * 1024 * 1024;

/// Where uploaded logos and signatures live and how they are addressed.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding uploaded images; served at `/uploads`.
    #[serde(default = "default_blob_dir")]
    pub blob_dir: PathBuf,

    /// URL prefix clients use to reach `blob_dir`.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,

    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.blob_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("STORAGE__BLOB_DIR"));
        }
        if !(self.public_base_url.starts_with("http://")
            || self.public_base_url.starts_with("https://"))
        {
            return Err(ValidationError::InvalidUrl {
                field: "storage.public_base_url",
                value: self.public_base_url.clone(),
            });
        }
        if self.max_upload_bytes == 0 || self.max_upload_bytes > MAX_UPLOAD_CEILING {
            return Err(ValidationError::InvalidUploadLimit);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            blob_dir: default_blob_dir(),
            public_base_url: default_public_base_url(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_blob_dir() -> PathBuf {
    PathBuf::from("./data/uploads")
}

fn default_public_base_url() -> String {
    "http://localhost:8080/uploads".to_string()
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}
