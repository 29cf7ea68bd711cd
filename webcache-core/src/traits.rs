//! Collaborator traits for webcache.
//!
//! Every layer talks to the outside world through these two interfaces,
//! which keeps the counting and caching policy testable without a network
//! or a running store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════════
// KEY-VALUE STORE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for the external key-value store.
///
/// Implementations might use:
/// - An in-process map (for testing/development)
/// - Redis (for production, shared between processes)
///
/// `incr` must be atomic. Nothing else is required to be.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the raw bytes stored at `key`, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` at `key`, replacing any previous value and clearing its TTL.
    async fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Sets (or refreshes) the time-to-live of an existing key.
    ///
    /// Returns `false` when the key does not exist.
    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool>;

    /// Atomically increments the integer at `key` by one and returns the new value.
    ///
    /// An absent key is created at 0 first, so the first call returns 1.
    async fn incr(&self, key: &str) -> Result<i64>;
}

#[async_trait]
impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).set(key, value).await
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        (**self).expire(key, ttl).await
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        (**self).incr(key).await
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PAGE SOURCE TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// A single-argument operation mapping a URL to page text.
///
/// The HTTP fetcher implements it, and so does every wrapper around it:
/// a wrapper takes a `PageSource` and is itself a `PageSource`, so layers
/// compose freely.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Returns the text of the page at `url`.
    async fn get_page(&self, url: &str) -> Result<String>;
}

#[async_trait]
impl<P: PageSource + ?Sized> PageSource for Arc<P> {
    async fn get_page(&self, url: &str) -> Result<String> {
        (**self).get_page(url).await
    }
}

#[async_trait]
impl<P: PageSource + ?Sized> PageSource for Box<P> {
    async fn get_page(&self, url: &str) -> Result<String> {
        (**self).get_page(url).await
    }
}
