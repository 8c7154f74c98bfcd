//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod resolution;
pub mod settings;

pub use resolution::{
    DeleteResolutionCommand, DeleteResolutionHandler, DocumentSource, ExportResolutionHandler,
    ExportResolutionQuery, GenerateDraftCommand, GenerateDraftError, GenerateDraftHandler,
    GenerateDraftResult, GetResolutionHandler, GetResolutionQuery, ListResolutionsHandler,
    ListResolutionsQuery, PreviewResolutionHandler, PreviewResolutionQuery,
    RenderResolutionError, SaveResolutionCommand, SaveResolutionHandler, StartDraftHandler,
    StartDraftQuery, StartDraftResult, DELETE_CONFIRMATION,
};
pub use settings::{
    GetSettingsHandler, GetSettingsQuery, SettingsError, UpdateSettingsCommand,
    UpdateSettingsHandler, UploadAssetCommand, UploadAssetHandler, UploadAssetResult,
};
