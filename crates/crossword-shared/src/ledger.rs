//! Progress ledger: coupons, completion counters, resume indices and the set
//! of already-rewarded puzzle instances.
//!
//! The ledger keeps an in-memory mirror of the persisted fields for cheap
//! reads. Every mutation starts from freshly read persisted values, holds the
//! ledger's writer lock for its whole read-modify-write, commits through one
//! `multi_set`, and only then updates the mirror. Within a process this makes
//! `apply_win` at-most-once per puzzle instance. Two processes sharing a store
//! are not coordinated.

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::achievements::ProgressStats;
use crate::codec::{decode_flag_set, encode_counter, encode_flag_set, parse_counter};
use crate::difficulty::{Difficulty, PuzzleInstanceId};
use crate::error::{CrosswordError, Result};
use crate::keys;
use crate::store::SharedStore;
use crate::unlock::TierUnlocks;

/// Resume index per topic and difficulty
pub type TopicProgress = BTreeMap<String, BTreeMap<Difficulty, u32>>;

/// In-memory view of the ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LedgerSnapshot {
    pub coupons: u64,
    pub completed_easy: u64,
    pub completed_medium: u64,
    pub completed_hard: u64,
    /// First-time completions at every tier, extreme included
    pub completed_total: u64,
    pub no_hint_wins: u64,
    pub topic_progress: TopicProgress,
    /// Serialized ids of every rewarded puzzle instance
    pub completed: BTreeSet<String>,
}

impl LedgerSnapshot {
    pub fn unlocks(&self) -> TierUnlocks {
        TierUnlocks::evaluate(self.completed_easy, self.completed_medium, self.completed_hard)
    }

    pub fn topic_index(&self, topic_id: &str, difficulty: Difficulty) -> u32 {
        self.topic_progress
            .get(topic_id)
            .and_then(|per_diff| per_diff.get(&difficulty))
            .copied()
            .unwrap_or(0)
    }

    pub fn is_completed(&self, id: &PuzzleInstanceId) -> bool {
        self.completed.contains(&id.to_string())
    }

    /// Dedicated counter for a tier; extreme has none
    pub fn completed_for(&self, difficulty: Difficulty) -> Option<u64> {
        match difficulty {
            Difficulty::Easy => Some(self.completed_easy),
            Difficulty::Medium => Some(self.completed_medium),
            Difficulty::Hard => Some(self.completed_hard),
            Difficulty::Extreme => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct WinOptions {
    pub used_hint: bool,
}

impl WinOptions {
    pub fn with_hint() -> Self {
        Self { used_hint: true }
    }
}

/// Result of recording a solved puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WinOutcome {
    pub reward: u64,
    pub first_time: bool,
}

impl WinOutcome {
    fn repeat() -> Self {
        Self {
            reward: 0,
            first_time: false,
        }
    }
}

/// Scalar counters as read from the store
#[derive(Debug, Clone, Copy, Default)]
struct StoredCounters {
    coupons: u64,
    easy: u64,
    medium: u64,
    hard: u64,
    total: u64,
    no_hint: u64,
}

impl StoredCounters {
    fn record_win(&mut self, difficulty: Difficulty, used_hint: bool) -> u64 {
        let reward = difficulty.reward();
        self.coupons = self.coupons.saturating_add(reward);
        match difficulty {
            Difficulty::Easy => self.easy += 1,
            Difficulty::Medium => self.medium += 1,
            Difficulty::Hard => self.hard += 1,
            Difficulty::Extreme => {}
        }
        self.total += 1;
        if !used_hint {
            self.no_hint += 1;
        }
        reward
    }

    fn entries(&self) -> Vec<(String, String)> {
        vec![
            (keys::COUPONS.to_string(), encode_counter(self.coupons)),
            (keys::COMPLETED_EASY.to_string(), encode_counter(self.easy)),
            (keys::COMPLETED_MEDIUM.to_string(), encode_counter(self.medium)),
            (keys::COMPLETED_HARD.to_string(), encode_counter(self.hard)),
            (keys::COMPLETED_TOTAL.to_string(), encode_counter(self.total)),
            (keys::NO_HINT_WINS.to_string(), encode_counter(self.no_hint)),
        ]
    }

    fn apply_to(&self, snapshot: &mut LedgerSnapshot) {
        snapshot.coupons = self.coupons;
        snapshot.completed_easy = self.easy;
        snapshot.completed_medium = self.medium;
        snapshot.completed_hard = self.hard;
        snapshot.completed_total = self.total;
        snapshot.no_hint_wins = self.no_hint;
    }
}

pub struct ProgressLedger {
    store: SharedStore,
    state: RwLock<LedgerSnapshot>,
    writer: Mutex<()>,
    loaded: AtomicBool,
}

impl ProgressLedger {
    /// Ledger with zero state; call [`ProgressLedger::load`] before reading
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            state: RwLock::new(LedgerSnapshot::default()),
            writer: Mutex::new(()),
            loaded: AtomicBool::new(false),
        }
    }

    /// Construct and load in one step
    pub async fn open(store: SharedStore) -> Result<Self> {
        let ledger = Self::new(store);
        ledger.load().await?;
        Ok(ledger)
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }

    /// Read every ledger field concurrently into the mirror.
    ///
    /// A field whose read fails keeps its previous mirror value. Only when
    /// every read fails is the error returned, and then the mirror is left
    /// untouched.
    pub async fn load(&self) -> Result<LedgerSnapshot> {
        let _writer = self.writer.lock().await;
        let store = &self.store;

        let (coupons, easy, medium, hard, total, no_hint, progress, completed) = tokio::join!(
            store.get(keys::COUPONS),
            store.get(keys::COMPLETED_EASY),
            store.get(keys::COMPLETED_MEDIUM),
            store.get(keys::COMPLETED_HARD),
            store.get(keys::COMPLETED_TOTAL),
            store.get(keys::NO_HINT_WINS),
            store.get(keys::TOPIC_PROGRESS),
            store.get(keys::COMPLETED_SET),
        );

        let counters = [
            (keys::COUPONS, coupons),
            (keys::COMPLETED_EASY, easy),
            (keys::COMPLETED_MEDIUM, medium),
            (keys::COMPLETED_HARD, hard),
            (keys::COMPLETED_TOTAL, total),
            (keys::NO_HINT_WINS, no_hint),
        ];

        let failures = counters.iter().filter(|(_, r)| r.is_err()).count()
            + usize::from(progress.is_err())
            + usize::from(completed.is_err());
        if failures == counters.len() + 2 {
            let first_error = counters
                .into_iter()
                .find_map(|(_, r)| r.err())
                .unwrap_or_else(|| CrosswordError::Store("ledger load failed".to_string()));
            return Err(first_error);
        }

        let mut state = self.state.write().await;
        let mut next = state.clone();

        for (key, result) in counters {
            let slot = match key {
                keys::COUPONS => &mut next.coupons,
                keys::COMPLETED_EASY => &mut next.completed_easy,
                keys::COMPLETED_MEDIUM => &mut next.completed_medium,
                keys::COMPLETED_HARD => &mut next.completed_hard,
                keys::COMPLETED_TOTAL => &mut next.completed_total,
                _ => &mut next.no_hint_wins,
            };
            match result {
                Ok(raw) => *slot = parse_counter(key, raw.as_deref()),
                Err(e) => warn!("Keeping previous value for {}: {}", key, e),
            }
        }

        match progress {
            Ok(raw) => next.topic_progress = decode_topic_progress(raw.as_deref()),
            Err(e) => warn!("Keeping previous topic progress: {}", e),
        }
        match completed {
            Ok(raw) => next.completed = decode_flag_set(keys::COMPLETED_SET, raw.as_deref()),
            Err(e) => warn!("Keeping previous completed set: {}", e),
        }

        if failures > 0 {
            warn!("Ledger loaded partially ({} of 8 reads failed)", failures);
        }
        debug!(
            "Ledger loaded from {}: {} coupons, {} completions",
            self.store.backend(),
            next.coupons,
            next.completed_total
        );

        *state = next.clone();
        self.loaded.store(true, Ordering::SeqCst);
        Ok(next)
    }

    pub async fn reload(&self) -> Result<LedgerSnapshot> {
        self.load().await
    }

    pub async fn snapshot(&self) -> LedgerSnapshot {
        self.state.read().await.clone()
    }

    pub async fn coupons(&self) -> u64 {
        self.state.read().await.coupons
    }

    pub async fn unlocks(&self) -> TierUnlocks {
        self.state.read().await.unlocks()
    }

    pub async fn stats(&self) -> ProgressStats {
        ProgressStats::from(&*self.state.read().await)
    }

    pub async fn is_completed(&self, id: &PuzzleInstanceId) -> bool {
        self.state.read().await.is_completed(id)
    }

    pub async fn get_topic_index(&self, topic_id: &str, difficulty: Difficulty) -> u32 {
        self.state.read().await.topic_index(topic_id, difficulty)
    }

    /// Record a solved puzzle. The first call for a given instance pays out
    /// the tier reward; every later call is a no-op returning zero.
    pub async fn apply_win(
        &self,
        topic_id: &str,
        difficulty: Difficulty,
        index: u32,
        options: WinOptions,
    ) -> Result<WinOutcome> {
        let cross_id = PuzzleInstanceId::new(topic_id, difficulty, index).to_string();
        let _writer = self.writer.lock().await;

        let (set_raw, mut counters) =
            tokio::try_join!(self.store.get(keys::COMPLETED_SET), self.read_counters())?;

        let mut completed = decode_flag_set(keys::COMPLETED_SET, set_raw.as_deref());
        if completed.contains(&cross_id) {
            debug!("{} already rewarded", cross_id);
            return Ok(WinOutcome::repeat());
        }

        let reward = counters.record_win(difficulty, options.used_hint);
        completed.insert(cross_id.clone());

        let mut batch = counters.entries();
        batch.push((keys::COMPLETED_SET.to_string(), encode_flag_set(&completed)?));
        self.store.multi_set(&batch).await?;

        let mut state = self.state.write().await;
        counters.apply_to(&mut state);
        state.completed = completed;

        info!(
            "First completion of {} (+{} coupons, balance {}, hint used: {})",
            cross_id, reward, counters.coupons, options.used_hint
        );
        Ok(WinOutcome {
            reward,
            first_time: true,
        })
    }

    /// Debit coupons, clamping at zero. Returns the new balance.
    pub async fn consume_coupons(&self, amount: u64) -> Result<u64> {
        let _writer = self.writer.lock().await;

        let balance = self.read_coupons().await?;
        let next = balance.saturating_sub(amount);
        self.store.set(keys::COUPONS, &encode_counter(next)).await?;

        self.state.write().await.coupons = next;
        info!("Spent {} coupons ({} -> {})", amount, balance, next);
        Ok(next)
    }

    /// Debit coupons only if the persisted balance covers `amount`.
    ///
    /// Returns the new balance, or `None` without writing anything when the
    /// balance is short.
    pub async fn try_spend(&self, amount: u64) -> Result<Option<u64>> {
        self.spend_with(amount, Vec::new()).await
    }

    /// Like [`ProgressLedger::try_spend`], but `extra` entries are committed in
    /// the same `multi_set` as the new balance. Either both land or neither does.
    pub async fn spend_with(
        &self,
        amount: u64,
        extra: Vec<(String, String)>,
    ) -> Result<Option<u64>> {
        let _writer = self.writer.lock().await;

        let balance = self.read_coupons().await?;
        if balance < amount {
            self.state.write().await.coupons = balance;
            debug!("Cannot spend {} coupons, balance is {}", amount, balance);
            return Ok(None);
        }

        let next = balance - amount;
        let mut batch = Vec::with_capacity(extra.len() + 1);
        batch.push((keys::COUPONS.to_string(), encode_counter(next)));
        batch.extend(extra);
        self.store.multi_set(&batch).await?;

        self.state.write().await.coupons = next;
        info!("Spent {} coupons ({} -> {})", amount, balance, next);
        Ok(Some(next))
    }

    /// Store the resume index for one topic/difficulty pair. Other pairs are
    /// carried over from the persisted map.
    pub async fn set_topic_index(
        &self,
        topic_id: &str,
        difficulty: Difficulty,
        index: u32,
    ) -> Result<()> {
        let _writer = self.writer.lock().await;

        let raw = self.store.get(keys::TOPIC_PROGRESS).await?;
        let mut progress = decode_topic_progress(raw.as_deref());
        progress
            .entry(topic_id.to_string())
            .or_default()
            .insert(difficulty, index);

        let encoded = serde_json::to_string(&progress)?;
        self.store.set(keys::TOPIC_PROGRESS, &encoded).await?;

        self.state.write().await.topic_progress = progress;
        debug!("Resume index for {}/{} set to {}", topic_id, difficulty, index);
        Ok(())
    }

    async fn read_coupons(&self) -> Result<u64> {
        let raw = self.store.get(keys::COUPONS).await?;
        Ok(parse_counter(keys::COUPONS, raw.as_deref()))
    }

    async fn read_counters(&self) -> Result<StoredCounters> {
        let store = &self.store;
        let (coupons, easy, medium, hard, total, no_hint) = tokio::try_join!(
            store.get(keys::COUPONS),
            store.get(keys::COMPLETED_EASY),
            store.get(keys::COMPLETED_MEDIUM),
            store.get(keys::COMPLETED_HARD),
            store.get(keys::COMPLETED_TOTAL),
            store.get(keys::NO_HINT_WINS),
        )?;

        Ok(StoredCounters {
            coupons: parse_counter(keys::COUPONS, coupons.as_deref()),
            easy: parse_counter(keys::COMPLETED_EASY, easy.as_deref()),
            medium: parse_counter(keys::COMPLETED_MEDIUM, medium.as_deref()),
            hard: parse_counter(keys::COMPLETED_HARD, hard.as_deref()),
            total: parse_counter(keys::COMPLETED_TOTAL, total.as_deref()),
            no_hint: parse_counter(keys::NO_HINT_WINS, no_hint.as_deref()),
        })
    }
}

/// Decode the topic map leniently: unknown difficulties and non-numeric
/// indices are dropped, everything else kept.
fn decode_topic_progress(raw: Option<&str>) -> TopicProgress {
    let Some(raw) = raw else {
        return TopicProgress::new();
    };
    let Ok(Value::Object(topics)) = serde_json::from_str::<Value>(raw) else {
        warn!("Ignoring malformed topic progress");
        return TopicProgress::new();
    };

    let mut progress = TopicProgress::new();
    for (topic_id, per_diff) in topics {
        let Value::Object(per_diff) = per_diff else {
            continue;
        };
        let indices: BTreeMap<Difficulty, u32> = per_diff
            .into_iter()
            .filter_map(|(diff, idx)| {
                let diff = diff.parse::<Difficulty>().ok()?;
                let idx = idx
                    .as_u64()
                    .or_else(|| idx.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))?;
                Some((diff, u32::try_from(idx).ok()?))
            })
            .collect();
        progress.insert(topic_id, indices);
    }
    progress
}
