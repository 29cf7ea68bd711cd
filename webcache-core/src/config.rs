//! Configuration structs.
//!
//! All of them deserialize with missing fields filled from [`Default`].

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CACHE_TTL_SECONDS, DEFAULT_FETCH_TIMEOUT_SECONDS, DEFAULT_REDIS_URL,
    DEFAULT_USER_AGENT,
};

/// Result cache configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Lifetime of a cached page in seconds
    pub ttl_seconds: u64,
    /// Whether an empty cached page counts as a miss.
    ///
    /// `true` keeps the long-standing behaviour where empty pages are never
    /// served from cache and are fetched again on every call.
    pub empty_is_miss: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
            empty_is_miss: true,
        }
    }
}

impl CacheConfig {
    /// Returns the TTL as a [`Duration`].
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    /// Serves empty cached pages as hits instead of re-fetching them.
    pub fn cache_empty_pages(mut self) -> Self {
        self.empty_is_miss = false;
        self
    }
}

/// HTTP fetch configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User-Agent header value
    pub user_agent: String,
    /// Fail on non-2xx responses instead of returning their body
    pub error_for_status: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_FETCH_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.into(),
            error_for_status: false,
        }
    }
}

impl FetchConfig {
    /// Fails fetches that return a non-success status.
    pub fn with_status_check(mut self) -> Self {
        self.error_for_status = true;
        self
    }
}

/// Key-value store connection configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Redis connection URL
    pub redis_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            redis_url: DEFAULT_REDIS_URL.into(),
        }
    }
}

impl StoreConfig {
    /// Creates a config pointing at `redis_url`.
    pub fn new(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
        }
    }
}
