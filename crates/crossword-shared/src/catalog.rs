//! Puzzle catalog: topics, difficulty buckets and cached totals.

use serde::{Deserialize, Serialize};

use crate::difficulty::Difficulty;
use crate::error::{CrosswordError, Result};

const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

/// A single clue/answer pair with its trivia fact
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PuzzleEntry {
    pub clue: String,
    pub answer: String,
    pub fact: String,
}

/// Ordered puzzle buckets, one per difficulty
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Levels {
    #[serde(default)]
    pub easy: Vec<PuzzleEntry>,
    #[serde(default)]
    pub medium: Vec<PuzzleEntry>,
    #[serde(default)]
    pub hard: Vec<PuzzleEntry>,
    #[serde(default)]
    pub extreme: Vec<PuzzleEntry>,
}

impl Levels {
    pub fn bucket(&self, difficulty: Difficulty) -> &[PuzzleEntry] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
            Difficulty::Extreme => &self.extreme,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    /// Cover image file name
    pub cover: String,
    pub levels: Levels,
}

impl Topic {
    pub fn bucket(&self, difficulty: Difficulty) -> &[PuzzleEntry] {
        self.levels.bucket(difficulty)
    }

    /// Entry shown for a stored resume index. Indices past the end clamp to
    /// the last entry; an empty bucket has nothing to show.
    pub fn entry_at(&self, difficulty: Difficulty, index: u32) -> Option<&PuzzleEntry> {
        let bucket = self.bucket(difficulty);
        let last = bucket.len().checked_sub(1)?;
        bucket.get((index as usize).min(last))
    }

    /// Resume index after solving `index`, wrapping to the start of the bucket
    pub fn next_index(&self, difficulty: Difficulty, index: u32) -> u32 {
        let len = self.bucket(difficulty).len() as u64;
        if len == 0 {
            0
        } else {
            ((u64::from(index) + 1) % len) as u32
        }
    }
}

/// Number of puzzles per difficulty across every topic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogTotals {
    pub easy: u64,
    pub medium: u64,
    pub hard: u64,
    pub extreme: u64,
}

impl CatalogTotals {
    fn from_topics(topics: &[Topic]) -> Self {
        let count = |d: Difficulty| topics.iter().map(|t| t.bucket(d).len() as u64).sum();
        Self {
            easy: count(Difficulty::Easy),
            medium: count(Difficulty::Medium),
            hard: count(Difficulty::Hard),
            extreme: count(Difficulty::Extreme),
        }
    }

    pub fn for_difficulty(&self, difficulty: Difficulty) -> u64 {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Extreme => self.extreme,
        }
    }
}

#[derive(Deserialize)]
struct CatalogFile {
    topics: Vec<Topic>,
}

/// The puzzle catalog. Totals are computed once at construction.
#[derive(Debug, Clone)]
pub struct Catalog {
    topics: Vec<Topic>,
    totals: CatalogTotals,
}

impl Catalog {
    pub fn new(topics: Vec<Topic>) -> Self {
        let totals = CatalogTotals::from_topics(&topics);
        Self { topics, totals }
    }

    /// The heritage catalog shipped with the game
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_CATALOG)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let file: CatalogFile = serde_json::from_str(json)?;
        Ok(Self::new(file.topics))
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn totals(&self) -> CatalogTotals {
        self.totals
    }

    pub fn topic(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == id)
    }

    pub fn require_topic(&self, id: &str) -> Result<&Topic> {
        self.topic(id)
            .ok_or_else(|| CrosswordError::UnknownTopic(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(answer: &str) -> PuzzleEntry {
        PuzzleEntry {
            clue: format!("clue for {}", answer),
            answer: answer.to_string(),
            fact: String::new(),
        }
    }

    fn topic(id: &str, easy: usize, medium: usize) -> Topic {
        Topic {
            id: id.to_string(),
            title: id.to_uppercase(),
            cover: format!("{}.png", id),
            levels: Levels {
                easy: (0..easy).map(|i| entry(&format!("E{}", i))).collect(),
                medium: (0..medium).map(|i| entry(&format!("M{}", i))).collect(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_builtin_catalog_totals() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.topics().len(), 5);
        let totals = catalog.totals();
        assert_eq!(totals.easy, 10);
        assert_eq!(totals.medium, 10);
        assert_eq!(totals.hard, 10);
        assert_eq!(totals.extreme, 10);
        assert!(catalog.topic("thermal").is_some());
    }

    #[test]
    fn test_totals_sum_across_topics() {
        let catalog = Catalog::new(vec![topic("a", 3, 1), topic("b", 2, 0)]);
        assert_eq!(catalog.totals().easy, 5);
        assert_eq!(catalog.totals().medium, 1);
        assert_eq!(catalog.totals().for_difficulty(Difficulty::Hard), 0);
    }

    #[test]
    fn test_next_index_wraps() {
        let t = topic("a", 3, 0);
        assert_eq!(t.next_index(Difficulty::Easy, 0), 1);
        assert_eq!(t.next_index(Difficulty::Easy, 2), 0);
        assert_eq!(t.next_index(Difficulty::Medium, 5), 0);
    }

    #[test]
    fn test_next_index_from_max_stored_index() {
        let t = topic("a", 3, 0);
        // (u32::MAX + 1) % 3 == 1
        assert_eq!(t.next_index(Difficulty::Easy, u32::MAX), 1);
    }

    #[test]
    fn test_entry_at_clamps() {
        let t = topic("a", 2, 0);
        assert_eq!(t.entry_at(Difficulty::Easy, 9).unwrap().answer, "E1");
        assert!(t.entry_at(Difficulty::Medium, 0).is_none());
    }

    #[test]
    fn test_unknown_topic() {
        let catalog = Catalog::new(vec![topic("a", 1, 1)]);
        let err = catalog.require_topic("zzz").unwrap_err();
        assert!(matches!(err, CrosswordError::UnknownTopic(_)));
    }
}
