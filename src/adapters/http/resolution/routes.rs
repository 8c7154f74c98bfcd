//! HTTP routes for resolution endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_resolution, delete_resolution, export_draft, export_resolution, generate_draft,
    get_resolution, list_resolutions, new_draft, preview_draft, preview_resolution,
    update_resolution, ResolutionHandlers,
};

/// Creates the resolution router; nest it under `/api/resolutions`.
pub fn resolution_routes(handlers: ResolutionHandlers) -> Router {
    Router::new()
        .route("/", get(list_resolutions).post(create_resolution))
        .route("/new", get(new_draft))
        .route("/preview", post(preview_draft))
        .route("/export", post(export_draft))
        .route("/generate", post(generate_draft))
        .route(
            "/:id",
            get(get_resolution)
                .put(update_resolution)
                .delete(delete_resolution),
        )
        .route("/:id/preview", get(preview_resolution))
        .route("/:id/export", get(export_resolution))
        .with_state(handlers)
}
