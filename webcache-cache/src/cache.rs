//! TTL result caching.
//!
//! The read-check-write sequence is not atomic. Two concurrent misses on the
//! same URL may both fetch and both write; the last write wins.

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use webcache_core::config::CacheConfig;
use webcache_core::error::{Result, WebCacheError};
use webcache_core::keys::cached_key;
use webcache_core::traits::{KeyValueStore, PageSource};

/// Serves pages from the store when present, otherwise fetches and caches them.
///
/// # Failure handling
///
/// - Store read errors propagate; there is no fallback to fetching.
/// - A cached value that is not UTF-8 is a [`WebCacheError::Decode`] error.
/// - Inner source errors propagate and nothing is written.
/// - Write or TTL errors after a successful fetch are logged and the fetched
///   page is returned anyway.
///
/// # Empty pages
///
/// With [`CacheConfig::empty_is_miss`] (the default) an empty cached page is
/// ignored and the page is fetched again on every call. Use
/// [`CacheConfig::cache_empty_pages`] to serve empty pages from cache.
#[derive(Clone, Debug)]
pub struct ResultCache<P, S> {
    inner: P,
    store: S,
    config: CacheConfig,
}

impl<P, S> ResultCache<P, S>
where
    P: PageSource,
    S: KeyValueStore,
{
    /// Wraps `inner` with the default 10 second TTL.
    pub fn new(inner: P, store: S) -> Self {
        Self::with_config(inner, store, CacheConfig::default())
    }

    /// Wraps `inner` with custom configuration.
    pub fn with_config(inner: P, store: S, config: CacheConfig) -> Self {
        Self {
            inner,
            store,
            config,
        }
    }

    /// Returns the wrapped source.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Reads the cached page for `key`, applying the empty-page policy.
    async fn lookup(&self, key: &str) -> Result<Option<String>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };

        if raw.is_empty() && self.config.empty_is_miss {
            debug!(key, "Empty cached page treated as miss");
            return Ok(None);
        }

        String::from_utf8(raw)
            .map(Some)
            .map_err(|source| WebCacheError::Decode {
                key: key.to_string(),
                source,
            })
    }

    /// Writes `page` and arms its TTL. Failures are logged, never returned.
    async fn remember(&self, key: &str, page: &str) {
        if let Err(e) = self.store.set(key, page.as_bytes()).await {
            warn!(key, error = %e, "Failed to cache page");
            return;
        }

        match self.store.expire(key, self.config.ttl()).await {
            Ok(true) => debug!(key, ttl_seconds = self.config.ttl_seconds, "Cached page"),
            Ok(false) => warn!(key, "Cached page disappeared before its TTL was set"),
            Err(e) => warn!(key, error = %e, "Failed to set cache TTL"),
        }
    }
}

#[async_trait]
impl<P, S> PageSource for ResultCache<P, S>
where
    P: PageSource,
    S: KeyValueStore,
{
    #[instrument(skip(self))]
    async fn get_page(&self, url: &str) -> Result<String> {
        let key = cached_key(url);

        if let Some(page) = self.lookup(&key).await? {
            debug!("Cache hit");
            return Ok(page);
        }

        debug!("Cache miss, fetching");
        let page = self.inner.get_page(url).await?;
        self.remember(&key, &page).await;

        Ok(page)
    }
}
