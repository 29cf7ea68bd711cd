//! # webcache store
//!
//! Key-value store backends for webcache.
//!
//! - **Memory**: in-process map with TTL support, for development and testing
//! - **Redis**: shared store for production deployments (`redis` feature)
//!
//! ## Example
//!
//! ```rust,ignore
//! use webcache_store::{KeyValueStore, MemoryStore};
//!
//! let store = MemoryStore::new();
//! assert_eq!(store.incr("count:http://a.test").await?, 1);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;
#[cfg(feature = "redis")]
mod redis_store;

pub use memory::MemoryStore;
#[cfg(feature = "redis")]
pub use redis_store::RedisStore;

// Re-export the trait from core
pub use webcache_core::traits::KeyValueStore;
