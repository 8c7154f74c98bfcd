//! Application router: every API module behind the auth middleware, plus
//! health and the public uploads directory.

use std::path::PathBuf;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use super::middleware::{auth_middleware, AuthState};
use super::resolution::{resolution_routes, ResolutionHandlers};
use super::settings::{settings_routes, SettingsHandlers};

/// Transport settings for the router.
#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Allowed browser origins; empty allows any.
    pub cors_origins: Vec<String>,
    pub request_timeout: Duration,
    /// Directory served read-only at `/uploads`.
    pub uploads_dir: PathBuf,
    /// Largest accepted upload body, in bytes.
    pub upload_body_limit: usize,
}

/// Builds the full application.
///
/// ```text
/// GET  /health
/// /api/resolutions/...   (auth)
/// /api/settings/...      (auth)
/// GET  /uploads/{owner}/{file}
/// ```
pub fn app_router(
    resolutions: ResolutionHandlers,
    settings: SettingsHandlers,
    auth: AuthState,
    config: &RouterSettings,
) -> Router {
    let api = Router::new()
        .nest("/resolutions", resolution_routes(resolutions))
        .nest("/settings", settings_routes(settings, config.upload_body_limit))
        .layer(middleware::from_fn_with_state(auth, auth_middleware));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .nest_service("/uploads", ServeDir::new(&config.uploads_dir))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors_layer(&config.cors_origins))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .expose_headers([header::CONTENT_DISPOSITION]);

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}
