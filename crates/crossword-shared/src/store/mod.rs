//! Key-value persistence adapter.
//!
//! The core only ever talks to [`KvStore`]: string keys, string values, every
//! call fallible. Three backends are provided:
//!
//! - [`MemoryStore`] for tests and throwaway sessions
//! - [`JsonFileStore`], a single JSON document on disk
//! - [`SqliteStore`], a `kv_entries` table in SQLite
//!
//! All three apply [`KvStore::multi_set`] atomically, which is what lets the
//! ledger commit a win as one unit.

mod file;
mod memory;
mod sqlite;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;

/// Async string key-value store
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Read a value; `None` when the key was never written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a single value
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Write several values as one batch
    async fn multi_set(&self, entries: &[(String, String)]) -> Result<()>;

    /// Backend name for logs
    fn backend(&self) -> &'static str;
}

/// Handle every component holds on to
pub type SharedStore = Arc<dyn KvStore>;
