//! Crossword configuration.
//!
//! Config file: `$CROSSWORD_CONFIG`, else ~/.config/heritage-crossword/config.toml.
//! A missing file means defaults.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

use crate::error::{CrosswordError, Result};
use crate::store::{JsonFileStore, MemoryStore, SharedStore, SqliteStore};

pub const CONFIG_ENV: &str = "CROSSWORD_CONFIG";
const APP_DIR: &str = "heritage-crossword";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    File,
    /// Nothing survives the process
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Sqlite => "sqlite",
            StorageBackend::File => "file",
            StorageBackend::Memory => "memory",
        }
    }

    fn default_file_name(&self) -> Option<&'static str> {
        match self {
            StorageBackend::Sqlite => Some("progress.db"),
            StorageBackend::File => Some("progress.json"),
            StorageBackend::Memory => None,
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageBackend {
    type Err = CrosswordError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "file" | "json" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(CrosswordError::Config(format!("unknown storage backend '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Overrides the file under the data dir
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Used when RUST_LOG is unset
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CrosswordConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CrosswordConfig {
    /// ~/.config/heritage-crossword/config.toml
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// ~/.local/share/heritage-crossword
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| CrosswordError::Config("cannot determine data directory".to_string()))
    }

    /// Load from `$CROSSWORD_CONFIG`, then the user config, then defaults
    pub fn load() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load_from(Path::new(&path));
        }
        match Self::user_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CrosswordError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&content)
            .map_err(|e| CrosswordError::Config(format!("{}: {}", path.display(), e)))?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| CrosswordError::Config(e.to_string()))
    }

    /// Where the configured backend keeps its data, if anywhere
    pub fn store_path(&self) -> Result<Option<PathBuf>> {
        let Some(file_name) = self.storage.backend.default_file_name() else {
            return Ok(None);
        };
        match &self.storage.path {
            Some(path) => Ok(Some(path.clone())),
            None => Ok(Some(Self::data_dir()?.join(file_name))),
        }
    }

    /// Build the configured store
    pub async fn open_store(&self) -> Result<SharedStore> {
        let store: SharedStore = match (self.storage.backend, self.store_path()?) {
            (StorageBackend::Sqlite, Some(path)) => Arc::new(SqliteStore::open(path).await?),
            (StorageBackend::File, Some(path)) => Arc::new(JsonFileStore::new(path)),
            _ => Arc::new(MemoryStore::new()),
        };
        debug!("Opened {} store", self.storage.backend);
        Ok(store)
    }
}
