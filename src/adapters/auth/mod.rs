//! Authentication adapters.
//!
//! - `StaticTokenValidator` - Maps configured bearer tokens to accounts

mod static_tokens;

pub use static_tokens::StaticTokenValidator;
