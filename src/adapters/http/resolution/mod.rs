//! HTTP adapter for resolution endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    DeleteResolutionRequest, ExportParams, GenerateDraftRequest, GenerateDraftResponse,
    ListResolutionsParams, NewDraftParams, NewDraftResponse, ResolutionListResponse,
    ResolutionResponse, ResolutionSummaryResponse,
};
pub use handlers::ResolutionHandlers;
pub use routes::resolution_routes;
