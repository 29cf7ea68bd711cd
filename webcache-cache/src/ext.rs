//! Fluent composition of page source layers.

use webcache_core::config::CacheConfig;
use webcache_core::traits::{KeyValueStore, PageSource};

use crate::cache::ResultCache;
use crate::counter::AccessCounter;

/// Adapters for stacking layers onto any [`PageSource`].
///
/// ```rust,ignore
/// let stack = HttpFetcher::new()?
///     .cached(store.clone())
///     .counted(store);
/// ```
pub trait PageSourceExt: PageSource + Sized {
    /// Wraps `self` in a [`ResultCache`] with the default TTL.
    fn cached<S: KeyValueStore>(self, store: S) -> ResultCache<Self, S> {
        ResultCache::new(self, store)
    }

    /// Wraps `self` in a [`ResultCache`] with custom configuration.
    fn cached_with<S: KeyValueStore>(self, store: S, config: CacheConfig) -> ResultCache<Self, S> {
        ResultCache::with_config(self, store, config)
    }

    /// Wraps `self` in an [`AccessCounter`].
    fn counted<S: KeyValueStore>(self, store: S) -> AccessCounter<Self, S> {
        AccessCounter::new(self, store)
    }
}

impl<P: PageSource> PageSourceExt for P {}
