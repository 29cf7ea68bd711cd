//! # webcache core
//!
//! Core types, errors, and traits shared by every webcache crate.
//!
//! - **Keys**: the `count:<url>` / `cached:<url>` naming scheme
//! - **Errors**: a single error enum covering store, fetch, and decode failures
//! - **Traits**: [`KeyValueStore`] and [`PageSource`], the two seams every
//!   layer is built around
//! - **Config**: serde-friendly configuration structs with sensible defaults
//!
//! ## Example
//!
//! ```rust
//! use webcache_core::{cached_key, count_key};
//!
//! assert_eq!(count_key("http://a.test"), "count:http://a.test");
//! assert_eq!(cached_key("http://a.test"), "cached:http://a.test");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod config;
pub mod constants;
pub mod error;
pub mod keys;
pub mod traits;

// Re-export commonly used items at crate root
pub use config::{CacheConfig, FetchConfig, StoreConfig};
pub use constants::*;
pub use error::{Result, WebCacheError};
pub use keys::{cached_key, count_key};
pub use traits::{KeyValueStore, PageSource};
