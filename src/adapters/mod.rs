//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the application to external systems:
//! - `ai` - Drafting services (Gemini, mock)
//! - `assets` - Image download for document export
//! - `auth` - Bearer token validation
//! - `document` - HTML preview and DOCX export
//! - `http` - REST API
//! - `storage` - Repositories and blob storage

pub mod ai;
pub mod assets;
pub mod auth;
pub mod document;
pub mod http;
pub mod storage;
