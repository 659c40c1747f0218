//! Difficulty unlock policy.
//!
//! Each tier past easy opens once four puzzles of the tier below it have been
//! completed for the first time. Counters never decrease, so a tier never
//! locks again.

use serde::Serialize;

use crate::difficulty::Difficulty;

/// First-time completions of the previous tier needed to open the next one
pub const UNLOCK_THRESHOLD: u64 = 4;

/// Which tiers are playable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TierUnlocks {
    pub easy: bool,
    pub medium: bool,
    pub hard: bool,
    pub extreme: bool,
}

impl TierUnlocks {
    pub fn evaluate(completed_easy: u64, completed_medium: u64, completed_hard: u64) -> Self {
        Self {
            easy: true,
            medium: completed_easy >= UNLOCK_THRESHOLD,
            hard: completed_medium >= UNLOCK_THRESHOLD,
            extreme: completed_hard >= UNLOCK_THRESHOLD,
        }
    }

    pub fn is_unlocked(&self, difficulty: Difficulty) -> bool {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Extreme => self.extreme,
        }
    }

    /// Highest playable tier
    pub fn highest(&self) -> Difficulty {
        Difficulty::ALL
            .iter()
            .rev()
            .copied()
            .find(|d| self.is_unlocked(*d))
            .unwrap_or(Difficulty::Easy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_player_has_easy_only() {
        let unlocks = TierUnlocks::evaluate(0, 0, 0);
        assert!(unlocks.easy);
        assert!(!unlocks.medium);
        assert!(!unlocks.hard);
        assert!(!unlocks.extreme);
        assert_eq!(unlocks.highest(), Difficulty::Easy);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(!TierUnlocks::evaluate(3, 0, 0).medium);
        assert!(TierUnlocks::evaluate(4, 0, 0).medium);
    }

    #[test]
    fn test_tiers_are_independent() {
        // Hard opens from medium completions even if easy was skipped via old data
        let unlocks = TierUnlocks::evaluate(0, 4, 0);
        assert!(!unlocks.medium);
        assert!(unlocks.hard);
        assert_eq!(unlocks.highest(), Difficulty::Hard);
    }

    #[test]
    fn test_monotonic_over_growing_counters() {
        let mut was_unlocked = false;
        for easy in 0..10 {
            let now = TierUnlocks::evaluate(easy, 0, 0).is_unlocked(Difficulty::Medium);
            assert!(!(was_unlocked && !now));
            assert_eq!(now, easy >= 4);
            was_unlocked = now;
        }
    }
}
