//! HTTP adapters - REST API implementations.
//!
//! Each module exposes its own handler state and routes; `router` mounts
//! them under `/api` behind the auth middleware.

mod error;
pub mod middleware;
pub mod resolution;
pub mod router;
pub mod settings;

pub use error::ErrorResponse;
pub use resolution::{resolution_routes, ResolutionHandlers};
pub use router::{app_router, RouterSettings};
pub use settings::{settings_routes, SettingsHandlers};
