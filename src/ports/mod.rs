//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `ResolutionRepository` - Saved resolutions, scoped per owner
//! - `OrgProfileRepository` - District branding and default signatories
//! - `BlobStorage` - Public logo and signature images
//!
//! ## Collaborators
//!
//! - `DraftingService` - AI-generated draft suggestions
//! - `AssetFetcher` - Downloads images for embedding in exports
//! - `DocumentExportService` - Renders composed documents to files
//! - `SessionValidator` - Bearer token to authenticated user

mod asset_fetcher;
mod blob_storage;
mod document_export_service;
mod drafting_service;
mod org_profile_repository;
mod resolution_repository;
mod session_validator;

pub use asset_fetcher::{AssetFetchError, AssetFetcher, FetchedAsset};
pub use blob_storage::{
    AssetKind, BlobStorage, ImageType, UploadError, UploadPolicy, UploadRequest, ValidatedUpload,
    DEFAULT_MAX_UPLOAD_BYTES,
};
pub use document_export_service::{
    DocumentExportService, ExportAssets, ExportError, ExportFormat, ExportedDocument,
};
pub use drafting_service::{
    parse_suggestion, strip_code_fences, DraftRequest, DraftSuggestion, DraftingError,
    DraftingService, MAX_CONTEXT_CHARS, MAX_PROMPT_CHARS,
};
pub use org_profile_repository::OrgProfileRepository;
pub use resolution_repository::{ResolutionFilter, ResolutionRepository};
pub use session_validator::SessionValidator;
