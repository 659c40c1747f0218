//! Everything a command needs, opened once per invocation.

use anyhow::{Context as _, Result};
use crossword_shared::{
    Catalog, CrosswordConfig, Facts, PreferenceStore, ProgressLedger, SeenOverlay, SharedStore,
    StorageBackend, WallpaperShop,
};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

pub struct AppContext {
    pub ledger: Arc<ProgressLedger>,
    pub catalog: Catalog,
    pub facts: Facts,
    pub seen: SeenOverlay,
    pub shop: WallpaperShop,
    pub prefs: PreferenceStore,
}

impl AppContext {
    /// Wire every component to one store and load the ledger
    pub async fn open(store: SharedStore) -> Result<Self> {
        let catalog = Catalog::builtin().context("Built-in catalog is malformed")?;
        let facts = Facts::builtin().context("Built-in facts are malformed")?;
        let ledger = Arc::new(
            ProgressLedger::open(store.clone())
                .await
                .context("Failed to load progress")?,
        );
        debug!("Context ready on {} store", store.backend());

        Ok(Self {
            seen: SeenOverlay::new(store.clone()),
            shop: WallpaperShop::new(ledger.clone()),
            prefs: PreferenceStore::new(store),
            ledger,
            catalog,
            facts,
        })
    }
}

/// Config file from the flag if given, else the usual lookup
pub fn load_config(path: Option<&Path>, backend: Option<StorageBackend>) -> Result<CrosswordConfig> {
    let mut config = match path {
        Some(path) => CrosswordConfig::load_from(path)?,
        None => CrosswordConfig::load()?,
    };
    if let Some(backend) = backend {
        config.storage.backend = backend;
    }
    Ok(config)
}

#[cfg(test)]
pub(crate) async fn memory_context() -> AppContext {
    use crossword_shared::MemoryStore;
    AppContext::open(Arc::new(MemoryStore::new())).await.unwrap()
}
