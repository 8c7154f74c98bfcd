//! Asset adapters - fetch images embedded in exported documents.
//!
//! - `HttpAssetFetcher` - Downloads over HTTP(S) with reqwest
//! - `InMemoryAssetFetcher` - Serves pre-registered bytes (tests, offline)

mod http_asset_fetcher;
mod in_memory_asset_fetcher;

pub use http_asset_fetcher::HttpAssetFetcher;
pub use in_memory_asset_fetcher::InMemoryAssetFetcher;
