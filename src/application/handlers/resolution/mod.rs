//! Resolution command and query handlers.

mod delete_resolution;
mod export_resolution;
mod generate_draft;
mod get_resolution;
mod list_resolutions;
mod preview_resolution;
mod save_resolution;
mod source;
mod start_draft;

pub use delete_resolution::{DeleteResolutionCommand, DeleteResolutionHandler, DELETE_CONFIRMATION};
pub use export_resolution::{ExportResolutionHandler, ExportResolutionQuery};
pub use generate_draft::{
    GenerateDraftCommand, GenerateDraftError, GenerateDraftHandler, GenerateDraftResult,
};
pub use get_resolution::{GetResolutionHandler, GetResolutionQuery};
pub use list_resolutions::{ListResolutionsHandler, ListResolutionsQuery};
pub use preview_resolution::{PreviewResolutionHandler, PreviewResolutionQuery};
pub use save_resolution::{SaveResolutionCommand, SaveResolutionHandler};
pub use source::{DocumentSource, RenderResolutionError};
pub use start_draft::{StartDraftHandler, StartDraftQuery, StartDraftResult};
