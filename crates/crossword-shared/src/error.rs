//! Error types for the crossword core.

use thiserror::Error;

use crate::difficulty::Difficulty;

#[derive(Error, Debug)]
pub enum CrosswordError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    TaskJoin(String),

    #[error("Unknown topic: {0}")]
    UnknownTopic(String),

    #[error("Unknown wallpaper: {0}")]
    UnknownWallpaper(String),

    #[error("Unknown fact: {0}")]
    UnknownFact(String),

    #[error("Invalid difficulty: {0}")]
    InvalidDifficulty(String),

    #[error("Invalid puzzle id: {0}")]
    InvalidPuzzleId(String),

    #[error("No puzzles in {0}")]
    NoPuzzles(String),

    #[error("Difficulty {0} is still locked")]
    TierLocked(Difficulty),

    #[error("Config error: {0}")]
    Config(String),
}

impl CrosswordError {
    pub fn code(&self) -> i32 {
        match self {
            CrosswordError::Store(_) => -32001,
            CrosswordError::Sqlite(_) => -32002,
            CrosswordError::Io(_) => -32006,
            CrosswordError::Json(_) => -32700,
            CrosswordError::TaskJoin(_) => -32603,
            CrosswordError::UnknownTopic(_) => -32010,
            CrosswordError::UnknownWallpaper(_) => -32011,
            CrosswordError::UnknownFact(_) => -32016,
            CrosswordError::InvalidDifficulty(_) => -32012,
            CrosswordError::InvalidPuzzleId(_) => -32013,
            CrosswordError::NoPuzzles(_) => -32014,
            CrosswordError::TierLocked(_) => -32015,
            CrosswordError::Config(_) => -32020,
        }
    }

    /// Whether the failure came from the persistence layer rather than caller input.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            CrosswordError::Store(_)
                | CrosswordError::Sqlite(_)
                | CrosswordError::Io(_)
                | CrosswordError::TaskJoin(_)
        )
    }
}

impl From<tokio::task::JoinError> for CrosswordError {
    fn from(err: tokio::task::JoinError) -> Self {
        CrosswordError::TaskJoin(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CrosswordError>;
