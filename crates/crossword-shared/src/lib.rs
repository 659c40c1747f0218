//! Progress and economy core for the heritage crossword game.
//!
//! Everything the player earns or spends goes through [`ProgressLedger`];
//! achievements and tier unlocks are derived from it and never stored.

pub mod achievements;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod difficulty;
pub mod error;
pub mod facts;
pub mod keys;
pub mod ledger;
pub mod preferences;
pub mod session;
pub mod store;
pub mod unlock;
pub mod wallpapers;

pub use achievements::{Achievement, AchievementId, ProgressStats, SeenOverlay};
pub use catalog::{Catalog, CatalogTotals, PuzzleEntry, Topic};
pub use config::{CrosswordConfig, StorageBackend};
pub use difficulty::{Difficulty, PuzzleInstanceId};
pub use error::{CrosswordError, Result};
pub use facts::{Facts, HeritageFact};
pub use ledger::{LedgerSnapshot, ProgressLedger, WinOptions, WinOutcome};
pub use preferences::{PreferenceStore, Preferences, Toggle};
pub use session::{GameSession, HintOutcome, PuzzleAttempt, SubmitOutcome};
pub use store::{JsonFileStore, KvStore, MemoryStore, SharedStore, SqliteStore};
pub use unlock::TierUnlocks;
pub use wallpapers::{PurchaseOutcome, Wallpaper, WallpaperShop};
