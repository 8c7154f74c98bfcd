//! Resolution Builder - Board resolution drafting for water districts
//!
//! Clerks assemble whereas/resolved clauses and signatories into a draft,
//! preview it as print-ready HTML, and export it as DOCX. Drafts can be
//! seeded from a Gemini-generated suggestion.
//!
//! Layout follows ports and adapters:
//! - `domain` - clauses, signatories, composition, organization profile
//! - `ports` - traits for storage, drafting, export, assets, auth
//! - `application` - command/query handlers and the editing session
//! - `adapters` - HTTP, Gemini, DOCX/HTML, in-memory and filesystem storage
//! - `config` - environment-driven settings

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
