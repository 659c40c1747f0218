//! In-memory store with failure injection for tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::KvStore;
use crate::error::{CrosswordError, Result};

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    failing_reads: RwLock<HashSet<String>>,
    failing_writes: RwLock<HashSet<String>>,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store with raw values
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(map),
            ..Default::default()
        }
    }

    /// Make every read of `key` fail until cleared
    pub async fn fail_reads_for(&self, key: &str) {
        self.failing_reads.write().await.insert(key.to_string());
    }

    pub async fn clear_read_failures(&self) {
        self.failing_reads.write().await.clear();
    }

    /// Make any write touching `key` fail until cleared. A batch that
    /// includes `key` is rejected whole.
    pub async fn fail_writes_for(&self, key: &str) {
        self.failing_writes.write().await.insert(key.to_string());
    }

    pub async fn clear_write_failures(&self) {
        self.failing_writes.write().await.clear();
    }

    /// Make every write fail (nothing is applied while set)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Raw value, bypassing failure injection
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.entries.read().await.get(key).cloned()
    }

    async fn check_writable<'a, I>(&self, keys: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CrosswordError::Store("injected write failure".to_string()));
        }
        let failing = self.failing_writes.read().await;
        if let Some(key) = keys.into_iter().find(|k| failing.contains(*k)) {
            return Err(CrosswordError::Store(format!(
                "injected write failure for {}",
                key
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.failing_reads.read().await.contains(key) {
            return Err(CrosswordError::Store(format!(
                "injected read failure for {}",
                key
            )));
        }
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.check_writable([key]).await?;
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn multi_set(&self, entries: &[(String, String)]) -> Result<()> {
        self.check_writable(entries.iter().map(|(k, _)| k.as_str()))
            .await?;
        let mut map = self.entries.write().await;
        for (key, value) in entries {
            map.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
