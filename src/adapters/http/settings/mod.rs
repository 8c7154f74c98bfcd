//! HTTP adapter for organization settings.

mod dto;
mod handlers;
mod routes;

pub use dto::{SettingsResponse, UploadParams, UploadResponse};
pub use handlers::SettingsHandlers;
pub use routes::settings_routes;
