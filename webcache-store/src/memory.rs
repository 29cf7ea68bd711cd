//! In-memory key-value store.
//!
//! Thread-safe, TTL-aware storage suitable for tests, development, and
//! single-process deployments. Mirrors the subset of Redis semantics the
//! cache layers rely on.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::{debug, instrument};

use webcache_core::error::{Result, WebCacheError};
use webcache_core::traits::KeyValueStore;

/// Stored value with an optional deadline.
#[derive(Clone, Debug)]
struct Entry {
    value: Vec<u8>,
    expires_at: Option<Instant>,
}

impl Entry {
    fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            expires_at: None,
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// In-memory key-value store.
///
/// Expired entries read as absent and are removed lazily on access or by
/// [`MemoryStore::cleanup_expired`].
///
/// # Thread Safety
///
/// All operations are thread-safe. `incr` holds the shard lock for the
/// whole read-modify-write, so concurrent increments never lose updates.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Entry>,
}

impl MemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the remaining time-to-live of `key`.
    ///
    /// `None` when the key is absent, expired, or has no TTL.
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        let entry = self.entries.get(key)?;
        let deadline = entry.expires_at?;
        deadline
            .checked_duration_since(Instant::now())
            .filter(|remaining| !remaining.is_zero())
    }

    /// Returns the number of stored entries (including expired, not yet purged).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.entries.clear();
    }

    /// Removes all expired entries.
    pub fn cleanup_expired(&self) {
        self.entries.retain(|_, entry| !entry.is_expired());
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        // The read guard must be dropped before removing the stale entry.
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value.clone())),
            Some(_) => true,
            None => false,
        };

        if expired {
            self.entries.remove_if(key, |_, entry| entry.is_expired());
            debug!(key, "Purged expired entry");
        }

        Ok(None)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), Entry::new(value.to_vec()));
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        match self.entries.get_mut(key) {
            Some(mut entry) if !entry.is_expired() => {
                let deadline = Instant::now().checked_add(ttl).ok_or_else(|| {
                    WebCacheError::ConfigError(format!("TTL out of range: {:?}", ttl))
                })?;
                entry.expires_at = Some(deadline);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    #[instrument(skip(self))]
    async fn incr(&self, key: &str) -> Result<i64> {
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::new(b"0".to_vec()));

        if entry.is_expired() {
            *entry = Entry::new(b"0".to_vec());
        }

        let current: i64 = std::str::from_utf8(&entry.value)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| WebCacheError::NotAnInteger {
                key: key.to_string(),
            })?;

        let next = current.checked_add(1).ok_or_else(|| {
            WebCacheError::StoreError(format!("increment would overflow '{}'", key))
        })?;

        entry.value = next.to_string().into_bytes();
        Ok(next)
    }
}
