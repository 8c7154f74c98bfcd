//! Storage Adapters
//!
//! Implementations of the persistence ports.
//!
//! ## Available Adapters
//!
//! - **InMemoryResolutionRepository** - Resolutions in memory (development/testing)
//! - **InMemoryOrgProfileRepository** - Organization profiles in memory
//! - **LocalBlobStorage** - Uploaded images on the local filesystem
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryResolutionRepository, LocalBlobStorage};
//!
//! let resolutions = InMemoryResolutionRepository::new();
//! let blobs = LocalBlobStorage::new("./data/uploads", "http://localhost:8080/uploads");
//! ```

mod in_memory_org_profile_repository;
mod in_memory_resolution_repository;
mod local_blob_storage;

pub use in_memory_org_profile_repository::InMemoryOrgProfileRepository;
pub use in_memory_resolution_repository::InMemoryResolutionRepository;
pub use local_blob_storage::LocalBlobStorage;
