//! Difficulty tiers, the coupon reward table and puzzle instance ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CrosswordError;

/// Difficulty tier of a puzzle bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Extreme,
}

impl Difficulty {
    /// All tiers, easiest first
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Extreme,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Extreme => "extreme",
        }
    }

    /// Coupons granted for the first completion of a puzzle at this tier
    pub fn reward(&self) -> u64 {
        match self {
            Difficulty::Easy => 3,
            Difficulty::Medium => 4,
            Difficulty::Hard => 5,
            Difficulty::Extreme => 6,
        }
    }

    /// Tier whose completions unlock this one
    pub fn previous(&self) -> Option<Difficulty> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(Difficulty::Easy),
            Difficulty::Hard => Some(Difficulty::Medium),
            Difficulty::Extreme => Some(Difficulty::Hard),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = CrosswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "extreme" => Ok(Difficulty::Extreme),
            _ => Err(CrosswordError::InvalidDifficulty(s.to_string())),
        }
    }
}

/// One puzzle occurrence: the unit of reward de-duplication.
///
/// Serialized as `topic:difficulty:index`. A topic id may itself contain `:`,
/// so parsing splits from the right.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PuzzleInstanceId {
    pub topic_id: String,
    pub difficulty: Difficulty,
    pub index: u32,
}

impl PuzzleInstanceId {
    pub fn new(topic_id: impl Into<String>, difficulty: Difficulty, index: u32) -> Self {
        Self {
            topic_id: topic_id.into(),
            difficulty,
            index,
        }
    }
}

impl fmt::Display for PuzzleInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.topic_id, self.difficulty, self.index)
    }
}

impl FromStr for PuzzleInstanceId {
    type Err = CrosswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CrosswordError::InvalidPuzzleId(s.to_string());

        let mut parts = s.rsplitn(3, ':');
        let index = parts.next().ok_or_else(invalid)?;
        let difficulty = parts.next().ok_or_else(invalid)?;
        let topic_id = parts.next().filter(|t| !t.is_empty()).ok_or_else(invalid)?;

        Ok(Self {
            topic_id: topic_id.to_string(),
            difficulty: difficulty.parse().map_err(|_| invalid())?,
            index: index.parse().map_err(|_| invalid())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reward_table() {
        assert_eq!(Difficulty::Easy.reward(), 3);
        assert_eq!(Difficulty::Medium.reward(), 4);
        assert_eq!(Difficulty::Hard.reward(), 5);
        assert_eq!(Difficulty::Extreme.reward(), 6);
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" extreme ".parse::<Difficulty>().unwrap(), Difficulty::Extreme);
        assert!("legendary".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_instance_id_format() {
        let id = PuzzleInstanceId::new("thermal", Difficulty::Medium, 1);
        assert_eq!(id.to_string(), "thermal:medium:1");
    }

    #[test]
    fn test_instance_id_topic_with_colon() {
        let id: PuzzleInstanceId = "city:old:hard:7".parse().unwrap();
        assert_eq!(id.topic_id, "city:old");
        assert_eq!(id.difficulty, Difficulty::Hard);
        assert_eq!(id.index, 7);
    }

    #[test]
    fn test_instance_id_rejects_garbage() {
        assert!("thermal:easy".parse::<PuzzleInstanceId>().is_err());
        assert!(":easy:1".parse::<PuzzleInstanceId>().is_err());
        assert!("thermal:easy:x".parse::<PuzzleInstanceId>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Difficulty::Extreme).unwrap();
        assert_eq!(json, "\"extreme\"");
    }
}
