//! # webcache cache
//!
//! Wrapping layers around a [`PageSource`]:
//!
//! - [`AccessCounter`]: bumps `count:<url>` on every call, hit or miss
//! - [`ResultCache`]: serves `cached:<url>` when present, otherwise fetches
//!   and stores the page with a short TTL
//! - [`PageService`]: the standard stack, counter outside cache outside source
//!
//! Each layer is itself a [`PageSource`], so they compose in any order.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use webcache_cache::PageService;
//! use webcache_fetch::HttpFetcher;
//! use webcache_store::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! let service = PageService::new(store, HttpFetcher::new()?);
//!
//! let html = service.get_page("http://a.test").await?;
//! assert_eq!(service.access_count("http://a.test").await?, 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod cache;
mod counter;
mod ext;
mod service;

#[cfg(test)]
mod testing;

pub use cache::ResultCache;
pub use counter::AccessCounter;
pub use ext::PageSourceExt;
pub use service::PageService;

pub use webcache_core::config::CacheConfig;
pub use webcache_core::traits::{KeyValueStore, PageSource};
