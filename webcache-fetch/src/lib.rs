//! HTTP page fetcher for webcache.
//!
//! The innermost layer: no caching, no retries. Redirects and timeouts are
//! whatever the underlying `reqwest` client does.

mod fetch;

pub use fetch::HttpFetcher;
pub use webcache_core::config::FetchConfig;
