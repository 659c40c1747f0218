//! Achievement badges.
//!
//! Unlock state is never stored: it is recomputed from ledger counters and
//! catalog totals every time. What is stored is the "seen" overlay, the set of
//! achievements the player has already looked at, which drives the
//! new-achievement indicator.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::catalog::CatalogTotals;
use crate::codec::{decode_flag_set, encode_flag_set};
use crate::error::Result;
use crate::keys;
use crate::ledger::LedgerSnapshot;
use crate::store::SharedStore;

/// Solves needed for early_scholar
pub const EARLY_SCHOLAR_WINS: u64 = 5;
/// Hint-free solves needed for consistent_mind
pub const CONSISTENT_MIND_WINS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementId {
    FirstStep,
    EarlyScholar,
    SteadyProgress,
    ConsistentMind,
    HeritageKeeper,
    LegacyCompleted,
}

impl AchievementId {
    pub const ALL: [AchievementId; 6] = [
        AchievementId::FirstStep,
        AchievementId::EarlyScholar,
        AchievementId::SteadyProgress,
        AchievementId::ConsistentMind,
        AchievementId::HeritageKeeper,
        AchievementId::LegacyCompleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstStep => "first_step",
            AchievementId::EarlyScholar => "early_scholar",
            AchievementId::SteadyProgress => "steady_progress",
            AchievementId::ConsistentMind => "consistent_mind",
            AchievementId::HeritageKeeper => "heritage_keeper",
            AchievementId::LegacyCompleted => "legacy_completed",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AchievementId::FirstStep => "First Step",
            AchievementId::EarlyScholar => "Early Scholar",
            AchievementId::SteadyProgress => "Steady Progress",
            AchievementId::ConsistentMind => "Consistent Mind",
            AchievementId::HeritageKeeper => "Heritage Keeper",
            AchievementId::LegacyCompleted => "Legacy Completed",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AchievementId::FirstStep => "Completed your first crossword.",
            AchievementId::EarlyScholar => "Solved 5 crosswords in any categories.",
            AchievementId::SteadyProgress => "Completed all Easy level crosswords.",
            AchievementId::ConsistentMind => "Solved 10 crosswords without using hints.",
            AchievementId::HeritageKeeper => "Completed all Medium level crosswords.",
            AchievementId::LegacyCompleted => {
                "Completed at least one crossword at every difficulty level."
            }
        }
    }

    /// ASCII badge symbol
    pub fn badge(&self) -> &'static str {
        match self {
            AchievementId::FirstStep => "[1]",
            AchievementId::EarlyScholar => "[5]",
            AchievementId::SteadyProgress => "<E>",
            AchievementId::ConsistentMind => "(10)",
            AchievementId::HeritageKeeper => "<M>",
            AchievementId::LegacyCompleted => "{*}",
        }
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AchievementId {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AchievementId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or(())
    }
}

/// Ledger counters the policy looks at
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProgressStats {
    pub completed_total: u64,
    pub no_hint_wins: u64,
    pub completed_easy: u64,
    pub completed_medium: u64,
    pub completed_hard: u64,
}

impl From<&LedgerSnapshot> for ProgressStats {
    fn from(snapshot: &LedgerSnapshot) -> Self {
        Self {
            completed_total: snapshot.completed_total,
            no_hint_wins: snapshot.no_hint_wins,
            completed_easy: snapshot.completed_easy,
            completed_medium: snapshot.completed_medium,
            completed_hard: snapshot.completed_hard,
        }
    }
}

/// Achievement with its unlock state
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub badge: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub unlocked: bool,
    /// Progress toward the goal as (current, target); current is capped at target
    pub progress: (u64, u64),
}

/// Check if a specific achievement is unlocked
pub fn is_unlocked(id: AchievementId, stats: &ProgressStats, totals: &CatalogTotals) -> bool {
    match id {
        AchievementId::FirstStep => stats.completed_total >= 1,
        AchievementId::EarlyScholar => stats.completed_total >= EARLY_SCHOLAR_WINS,
        AchievementId::SteadyProgress => totals.easy > 0 && stats.completed_easy >= totals.easy,
        AchievementId::ConsistentMind => stats.no_hint_wins >= CONSISTENT_MIND_WINS,
        AchievementId::HeritageKeeper => {
            totals.medium > 0 && stats.completed_medium >= totals.medium
        }
        AchievementId::LegacyCompleted => {
            stats.completed_easy >= 1 && stats.completed_medium >= 1 && stats.completed_hard >= 1
        }
    }
}

/// Progress shown next to a locked badge
pub fn progress(id: AchievementId, stats: &ProgressStats, totals: &CatalogTotals) -> (u64, u64) {
    let (current, target) = match id {
        AchievementId::FirstStep => (stats.completed_total, 1),
        AchievementId::EarlyScholar => (stats.completed_total, EARLY_SCHOLAR_WINS),
        AchievementId::SteadyProgress => (stats.completed_easy, totals.easy),
        AchievementId::ConsistentMind => (stats.no_hint_wins, CONSISTENT_MIND_WINS),
        AchievementId::HeritageKeeper => (stats.completed_medium, totals.medium),
        AchievementId::LegacyCompleted => {
            let tiers = [stats.completed_easy, stats.completed_medium, stats.completed_hard];
            (tiers.iter().filter(|c| **c >= 1).count() as u64, 3)
        }
    };
    (current.min(target), target)
}

/// Every achievement with its unlock flag, in display order
pub fn check_achievements(stats: &ProgressStats, totals: &CatalogTotals) -> Vec<Achievement> {
    AchievementId::ALL
        .iter()
        .map(|&id| Achievement {
            id,
            badge: id.badge(),
            title: id.title(),
            description: id.description(),
            unlocked: is_unlocked(id, stats, totals),
            progress: progress(id, stats, totals),
        })
        .collect()
}

/// Ids of unlocked achievements, in display order
pub fn unlocked_achievements(stats: &ProgressStats, totals: &CatalogTotals) -> Vec<AchievementId> {
    AchievementId::ALL
        .iter()
        .copied()
        .filter(|id| is_unlocked(*id, stats, totals))
        .collect()
}

/// Achievements unlocked by moving from `old` to `new`
pub fn newly_unlocked(
    old: &ProgressStats,
    new: &ProgressStats,
    totals: &CatalogTotals,
) -> Vec<AchievementId> {
    unlocked_achievements(new, totals)
        .into_iter()
        .filter(|id| !is_unlocked(*id, old, totals))
        .collect()
}

/// Badges of unlocked achievements on one line (ASCII style)
pub fn format_achievements(achievements: &[Achievement], max_display: usize) -> String {
    let unlocked: Vec<_> = achievements.iter().filter(|a| a.unlocked).collect();
    if unlocked.is_empty() {
        return String::new();
    }

    let badges: String = unlocked
        .iter()
        .take(max_display)
        .map(|a| a.badge)
        .collect::<Vec<_>>()
        .join(" ");

    if unlocked.len() > max_display {
        format!("{} +{} more", badges, unlocked.len() - max_display)
    } else {
        badges
    }
}

pub fn format_achievement_unlock(id: AchievementId) -> String {
    format!(
        "{} Achievement unlocked: {} - {}",
        id.badge(),
        id.title(),
        id.description()
    )
}

/// Persisted set of achievement ids the player has already seen
pub struct SeenOverlay {
    store: SharedStore,
    writer: Mutex<()>,
}

impl SeenOverlay {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
        }
    }

    pub async fn load(&self) -> Result<BTreeSet<String>> {
        let raw = self.store.get(keys::ACHIEVEMENTS_SEEN).await?;
        Ok(decode_flag_set(keys::ACHIEVEMENTS_SEEN, raw.as_deref()))
    }

    /// Unlocked achievements the player has not looked at yet
    pub async fn new_achievements(&self, unlocked: &[AchievementId]) -> Result<Vec<AchievementId>> {
        let seen = self.load().await?;
        Ok(unlocked
            .iter()
            .copied()
            .filter(|id| !seen.contains(id.as_str()))
            .collect())
    }

    /// Whether the new-achievement indicator should show
    pub async fn has_new(&self, unlocked: &[AchievementId]) -> Result<bool> {
        Ok(!self.new_achievements(unlocked).await?.is_empty())
    }

    /// Mark every unlocked id as seen. Returns whether anything was written.
    pub async fn mark_seen(&self, unlocked: &[AchievementId]) -> Result<bool> {
        let _writer = self.writer.lock().await;

        let mut seen = self.load().await?;
        let before = seen.len();
        seen.extend(unlocked.iter().map(|id| id.as_str().to_string()));

        if seen.len() == before {
            debug!("No new achievements to mark as seen");
            return Ok(false);
        }

        self.store
            .set(keys::ACHIEVEMENTS_SEEN, &encode_flag_set(&seen)?)
            .await?;
        info!("Marked {} achievements as seen", seen.len() - before);
        Ok(true)
    }
}
