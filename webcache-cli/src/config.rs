//! Process configuration: defaults, then `.env`, then environment.

use anyhow::{Context, Result};

use webcache_core::config::{CacheConfig, FetchConfig, StoreConfig};

/// Everything the binary needs to build a page service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub cache: CacheConfig,
    pub fetch: FetchConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(url) = lookup("REDIS_URL") {
            config.store.redis_url = url;
        }
        if let Some(raw) = lookup("WEBCACHE_TTL_SECONDS") {
            config.cache.ttl_seconds = raw
                .parse()
                .with_context(|| format!("WEBCACHE_TTL_SECONDS must be a whole number, got {:?}", raw))?;
        }
        if let Some(raw) = lookup("WEBCACHE_EMPTY_IS_MISS") {
            config.cache.empty_is_miss = raw != "false" && raw != "0";
        }
        if let Some(raw) = lookup("WEBCACHE_FETCH_TIMEOUT") {
            config.fetch.timeout_seconds = raw
                .parse()
                .with_context(|| format!("WEBCACHE_FETCH_TIMEOUT must be a whole number, got {:?}", raw))?;
        }

        Ok(config)
    }
}
