//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! `EditingSession` owns a draft while it is being edited; the handlers load,
//! save, render, and draft resolutions on behalf of an authenticated owner.

pub mod handlers;
mod session;

pub use handlers::*;
pub use session::{ClauseList, EditingSession};
