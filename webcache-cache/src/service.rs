//! The standard counting + caching stack.

use async_trait::async_trait;
use tracing::instrument;

use webcache_core::config::CacheConfig;
use webcache_core::error::Result;
use webcache_core::traits::{KeyValueStore, PageSource};

use crate::cache::ResultCache;
use crate::counter::AccessCounter;
use crate::ext::PageSourceExt;

/// Access counter around a result cache around a page source.
///
/// Every call bumps `count:<url>`, then checks `cached:<url>` before
/// possibly calling the source. Both layers share one store handle.
#[derive(Clone, Debug)]
pub struct PageService<P, S> {
    stack: AccessCounter<ResultCache<P, S>, S>,
}

impl<P, S> PageService<P, S>
where
    P: PageSource,
    S: KeyValueStore + Clone,
{
    /// Builds the stack with the default cache configuration.
    pub fn new(store: S, source: P) -> Self {
        Self::with_config(store, source, CacheConfig::default())
    }

    /// Builds the stack with custom cache configuration.
    pub fn with_config(store: S, source: P, config: CacheConfig) -> Self {
        let stack = source.cached_with(store.clone(), config).counted(store);
        Self { stack }
    }

    /// Fetches `url` through the counter and the cache.
    pub async fn get_page(&self, url: &str) -> Result<String> {
        self.stack.get_page(url).await
    }

    /// Returns how many times `url` has been requested.
    pub async fn access_count(&self, url: &str) -> Result<i64> {
        self.stack.count(url).await
    }

    /// Returns the underlying page source.
    pub fn source(&self) -> &P {
        self.stack.inner().inner()
    }

    /// Returns the cache configuration.
    pub fn cache_config(&self) -> &CacheConfig {
        self.stack.inner().config()
    }
}

#[async_trait]
impl<P, S> PageSource for PageService<P, S>
where
    P: PageSource,
    S: KeyValueStore + Clone,
{
    #[instrument(skip(self), name = "page_service")]
    async fn get_page(&self, url: &str) -> Result<String> {
        self.stack.get_page(url).await
    }
}
