//! Test doubles for the cache layers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use webcache_core::error::{Result, WebCacheError};
use webcache_core::traits::{KeyValueStore, PageSource};
use webcache_store::MemoryStore;

/// Page source serving canned pages; unknown URLs fail like a dead host.
#[derive(Default)]
pub(crate) struct StubSource {
    pages: HashMap<String, String>,
    calls: AtomicUsize,
}

impl StubSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for StubSource {
    async fn get_page(&self, url: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| WebCacheError::HttpError(format!("connection refused: {}", url)))
    }
}

/// Memory store with switchable failures and a log of successful operations.
#[derive(Default)]
pub(crate) struct FlakyStore {
    memory: MemoryStore,
    ops: Mutex<Vec<String>>,
    fail_get: AtomicBool,
    fail_set: AtomicBool,
    fail_expire: AtomicBool,
    fail_incr: AtomicBool,
}

impl FlakyStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn memory(&self) -> &MemoryStore {
        &self.memory
    }

    pub(crate) fn ops(&self) -> Vec<String> {
        self.ops.lock().clone()
    }

    pub(crate) fn fail_get(&self, fail: bool) {
        self.fail_get.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_set(&self, fail: bool) {
        self.fail_set.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_expire(&self, fail: bool) {
        self.fail_expire.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_incr(&self, fail: bool) {
        self.fail_incr.store(fail, Ordering::SeqCst);
    }

    fn check(&self, flag: &AtomicBool) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(WebCacheError::StoreUnavailable("connection refused".into()));
        }
        Ok(())
    }

    fn record(&self, op: String) {
        self.ops.lock().push(op);
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.check(&self.fail_get)?;
        let value = self.memory.get(key).await?;
        self.record(format!("get {}", key));
        Ok(value)
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.check(&self.fail_set)?;
        self.memory.set(key, value).await?;
        self.record(format!("set {}", key));
        Ok(())
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        self.check(&self.fail_expire)?;
        let existed = self.memory.expire(key, ttl).await?;
        self.record(format!("expire {} {}s", key, ttl.as_secs()));
        Ok(existed)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        self.check(&self.fail_incr)?;
        let value = self.memory.incr(key).await?;
        self.record(format!("incr {}", key));
        Ok(value)
    }
}
