//! Store selection for the binary.

use std::time::Duration;

use async_trait::async_trait;

use webcache_core::config::StoreConfig;
use webcache_core::error::Result;
use webcache_core::traits::KeyValueStore;
use webcache_store::{MemoryStore, RedisStore};

/// Either the process-local store or a Redis connection.
pub enum Backend {
    Memory(MemoryStore),
    Redis(RedisStore),
}

impl Backend {
    pub async fn open(memory: bool, config: &StoreConfig) -> Result<Self> {
        if memory {
            return Ok(Backend::Memory(MemoryStore::new()));
        }
        Ok(Backend::Redis(RedisStore::connect(config).await?))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Backend::Memory(_) => "memory",
            Backend::Redis(_) => "redis",
        }
    }

    pub async fn ttl(&self, key: &str) -> Result<Option<Duration>> {
        match self {
            Backend::Memory(store) => Ok(store.ttl(key)),
            Backend::Redis(store) => store.ttl(key).await,
        }
    }
}

#[async_trait]
impl KeyValueStore for Backend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self {
            Backend::Memory(store) => store.get(key).await,
            Backend::Redis(store) => store.get(key).await,
        }
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        match self {
            Backend::Memory(store) => store.set(key, value).await,
            Backend::Redis(store) => store.set(key, value).await,
        }
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        match self {
            Backend::Memory(store) => store.expire(key, ttl).await,
            Backend::Redis(store) => store.expire(key, ttl).await,
        }
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        match self {
            Backend::Memory(store) => store.incr(key).await,
            Backend::Redis(store) => store.incr(key).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_delegates() {
        let backend = Backend::open(true, &StoreConfig::default()).await.unwrap();
        assert_eq!(backend.name(), "memory");

        backend.set("cached:a", b"page").await.unwrap();
        assert!(backend.expire("cached:a", Duration::from_secs(10)).await.unwrap());
        assert!(backend.ttl("cached:a").await.unwrap().is_some());
        assert_eq!(backend.incr("count:a").await.unwrap(), 1);
    }
}
