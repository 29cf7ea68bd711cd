//! Redis-backed key-value store.
//!
//! Shares one multiplexed connection across callers through
//! [`ConnectionManager`], which reconnects on its own after a dropped link.

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, RedisError};
use tracing::{debug, info, instrument};

use webcache_core::config::StoreConfig;
use webcache_core::error::{Result, WebCacheError};
use webcache_core::traits::KeyValueStore;

/// Redis key-value store.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Connects to the Redis server described by `config`.
    #[instrument(skip(config), fields(url = %config.redis_url))]
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let client = redis::Client::open(config.redis_url.as_str())
            .map_err(|e| WebCacheError::ConfigError(format!("invalid Redis URL: {}", e)))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;

        info!("Connected to Redis");
        Ok(Self { conn })
    }

    /// Returns the remaining time-to-live of `key`.
    ///
    /// `None` when the key is absent or has no TTL.
    pub async fn ttl(&self, key: &str) -> Result<Option<Duration>> {
        let mut conn = self.conn.clone();
        let millis: i64 = conn.pttl(key).await.map_err(map_redis_error)?;
        Ok(u64::try_from(millis).ok().map(Duration::from_millis))
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.conn.clone();
        conn.get(key).await.map_err(map_redis_error)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, value).await.map_err(map_redis_error)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let millis = i64::try_from(ttl.as_millis())
            .map_err(|_| WebCacheError::ConfigError(format!("TTL out of range: {:?}", ttl)))?;

        let mut conn = self.conn.clone();
        conn.pexpire(key, millis).await.map_err(map_redis_error)
    }

    #[instrument(skip(self))]
    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.conn.clone();
        let value: i64 = conn.incr(key, 1i64).await.map_err(|e| {
            if e.to_string().contains("not an integer") {
                WebCacheError::NotAnInteger {
                    key: key.to_string(),
                }
            } else {
                map_redis_error(e)
            }
        })?;

        debug!(key, value, "Incremented");
        Ok(value)
    }
}

/// Splits Redis failures into "could not reach the server" and "server said no".
fn map_redis_error(e: RedisError) -> WebCacheError {
    if e.is_io_error() || e.is_connection_refusal() || e.is_connection_dropped() || e.is_timeout() {
        WebCacheError::StoreUnavailable(e.to_string())
    } else {
        WebCacheError::StoreError(e.to_string())
    }
}
