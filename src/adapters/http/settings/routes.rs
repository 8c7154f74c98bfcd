//! HTTP routes for settings endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use super::handlers::{get_settings, update_settings, upload_asset, SettingsHandlers};

/// Creates the settings router; nest it under `/api/settings`.
///
/// `body_limit` caps upload bodies before they are buffered. The upload
/// policy still enforces its own, smaller image limit.
pub fn settings_routes(handlers: SettingsHandlers, body_limit: usize) -> Router {
    Router::new()
        .route("/", get(get_settings).put(update_settings))
        .route(
            "/uploads",
            post(upload_asset).layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(handlers)
}
