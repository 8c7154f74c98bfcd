//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, auth, errors)
//! - `resolution` - Drafts, signatories, clause normalization, validation
//! - `organization` - District branding and default signatories
//! - `document` - Composition of a draft into renderer-neutral blocks

pub mod document;
pub mod foundation;
pub mod organization;
pub mod resolution;
