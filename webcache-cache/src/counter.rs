//! Per-URL access counting.

use async_trait::async_trait;
use tracing::{debug, instrument};

use webcache_core::error::{Result, WebCacheError};
use webcache_core::keys::count_key;
use webcache_core::traits::{KeyValueStore, PageSource};

/// Counts every call for a URL, then delegates.
///
/// The increment happens first and unconditionally: a failing inner call
/// still leaves the count bumped. If the increment itself fails the inner
/// source is never called.
#[derive(Clone, Debug)]
pub struct AccessCounter<P, S> {
    inner: P,
    store: S,
}

impl<P, S> AccessCounter<P, S>
where
    P: PageSource,
    S: KeyValueStore,
{
    /// Wraps `inner`, counting accesses in `store`.
    pub fn new(inner: P, store: S) -> Self {
        Self { inner, store }
    }

    /// Returns the wrapped source.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Returns how many times `url` has been requested (0 if never).
    pub async fn count(&self, url: &str) -> Result<i64> {
        let key = count_key(url);
        let Some(raw) = self.store.get(&key).await? else {
            return Ok(0);
        };

        std::str::from_utf8(&raw)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or(WebCacheError::NotAnInteger { key })
    }
}

#[async_trait]
impl<P, S> PageSource for AccessCounter<P, S>
where
    P: PageSource,
    S: KeyValueStore,
{
    #[instrument(skip(self))]
    async fn get_page(&self, url: &str) -> Result<String> {
        let count = self.store.incr(&count_key(url)).await?;
        debug!(count, "Counted access");

        self.inner.get_page(url).await
    }
}
