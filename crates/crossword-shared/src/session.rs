//! One attempt at a crossword clue.
//!
//! [`PuzzleAttempt`] holds the letter-bank rules and knows nothing about
//! coupons. [`GameSession`] ties an attempt to the ledger: hints are paid for,
//! a correct answer is recorded as a win, and moving on stores the next
//! resume index.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::catalog::{Catalog, PuzzleEntry};
use crate::difficulty::Difficulty;
use crate::error::{CrosswordError, Result};
use crate::ledger::{ProgressLedger, WinOptions, WinOutcome};

/// Coupons charged for revealing one letter
pub const HINT_COST: u64 = 2;

const FILLER_LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Answer letters plus `max(8, 16 - len)` random filler letters, shuffled
pub fn build_letter_bank<R: Rng + ?Sized>(answer: &[char], rng: &mut R) -> Vec<char> {
    let filler = 8.max(16usize.saturating_sub(answer.len()));
    let mut bank: Vec<char> = answer.to_vec();
    bank.extend((0..filler).map(|_| FILLER_LETTERS[rng.gen_range(0..FILLER_LETTERS.len())] as char));
    bank.shuffle(rng);
    bank
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotFeedback {
    Correct,
    Wrong,
}

#[derive(Debug, Clone)]
pub struct PuzzleAttempt {
    answer: Vec<char>,
    bank: Vec<char>,
    used: Vec<bool>,
    /// Placed letters with the bank slot each came from
    picked: Vec<(char, usize)>,
    hint_used: bool,
}

impl PuzzleAttempt {
    pub fn new(answer: &str) -> Self {
        Self::with_rng(answer, &mut rand::thread_rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(answer: &str, rng: &mut R) -> Self {
        let answer: Vec<char> = answer.trim().to_uppercase().chars().collect();
        let bank = build_letter_bank(&answer, rng);
        let used = vec![false; bank.len()];
        Self {
            answer,
            bank,
            used,
            picked: Vec::new(),
            hint_used: false,
        }
    }

    pub fn answer_len(&self) -> usize {
        self.answer.len()
    }

    pub fn bank(&self) -> &[char] {
        &self.bank
    }

    pub fn is_used(&self, slot: usize) -> bool {
        self.used.get(slot).copied().unwrap_or(false)
    }

    /// Letters placed so far
    pub fn picked(&self) -> String {
        self.picked.iter().map(|(c, _)| *c).collect()
    }

    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    pub fn is_full(&self) -> bool {
        self.picked.len() >= self.answer.len()
    }

    pub fn can_confirm(&self) -> bool {
        self.picked.len() == self.answer.len()
    }

    pub fn is_correct(&self) -> bool {
        self.can_confirm()
            && self
                .picked
                .iter()
                .zip(&self.answer)
                .all(|((c, _), expected)| c == expected)
    }

    /// Place the letter from a bank slot into the next answer position.
    /// Ignored when the slot is taken, out of range, or the answer is full.
    pub fn pick(&mut self, slot: usize) -> Option<SlotFeedback> {
        if self.is_full() || slot >= self.bank.len() || self.used[slot] {
            return None;
        }
        let letter = self.bank[slot];
        let expected = self.answer[self.picked.len()];

        self.used[slot] = true;
        self.picked.push((letter, slot));

        Some(if letter == expected {
            SlotFeedback::Correct
        } else {
            SlotFeedback::Wrong
        })
    }

    /// Pick the first free bank slot holding `letter`
    pub fn pick_letter(&mut self, letter: char) -> Option<SlotFeedback> {
        let letter = letter.to_ascii_uppercase();
        let slot = (0..self.bank.len()).find(|&i| self.bank[i] == letter && !self.used[i])?;
        self.pick(slot)
    }

    /// Remove the last placed letter and free its bank slot
    pub fn backspace(&mut self) -> Option<char> {
        let (letter, slot) = self.picked.pop()?;
        self.used[slot] = false;
        Some(letter)
    }

    pub fn mark_hint_used(&mut self) {
        self.hint_used = true;
    }

    /// Free bank slot holding the next expected letter
    pub fn hint_slot(&self) -> Option<usize> {
        if self.is_full() {
            return None;
        }
        let expected = self.answer[self.picked.len()];
        (0..self.bank.len()).find(|&i| self.bank[i] == expected && !self.used[i])
    }

    /// Place the correct letter from `slot`; the caller has already paid
    fn reveal(&mut self, slot: usize) -> char {
        let letter = self.bank[slot];
        self.used[slot] = true;
        self.picked.push((letter, slot));
        letter
    }

    /// Start over on the same bank. Clears the hint flag too.
    pub fn reset(&mut self) {
        self.picked.clear();
        self.used.iter_mut().for_each(|u| *u = false);
        self.hint_used = false;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HintOutcome {
    Revealed { letter: char, balance: u64 },
    NotAffordable { balance: u64 },
    Unavailable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Incomplete,
    Incorrect,
    Solved { outcome: WinOutcome, next_index: u32 },
}

pub struct GameSession {
    ledger: Arc<ProgressLedger>,
    topic_id: String,
    difficulty: Difficulty,
    index: u32,
    next_index: u32,
    entry: PuzzleEntry,
    attempt: PuzzleAttempt,
}

impl GameSession {
    /// Open the puzzle at the stored resume index for a topic and tier
    pub async fn start(
        ledger: Arc<ProgressLedger>,
        catalog: &Catalog,
        topic_id: &str,
        difficulty: Difficulty,
    ) -> Result<Self> {
        let mut rng = StdRng::from_entropy();
        Self::start_with_rng(ledger, catalog, topic_id, difficulty, &mut rng).await
    }

    pub async fn start_with_rng<R: Rng + ?Sized>(
        ledger: Arc<ProgressLedger>,
        catalog: &Catalog,
        topic_id: &str,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Self> {
        let topic = catalog.require_topic(topic_id)?;
        if !ledger.unlocks().await.is_unlocked(difficulty) {
            return Err(CrosswordError::TierLocked(difficulty));
        }

        let index = ledger.get_topic_index(topic_id, difficulty).await;
        let entry = topic
            .entry_at(difficulty, index)
            .cloned()
            .ok_or_else(|| CrosswordError::NoPuzzles(format!("{}/{}", topic_id, difficulty)))?;
        let attempt = PuzzleAttempt::with_rng(&entry.answer, rng);

        debug!("Starting {}/{} at index {}", topic_id, difficulty, index);
        Ok(Self {
            ledger,
            topic_id: topic_id.to_string(),
            difficulty,
            index,
            next_index: topic.next_index(difficulty, index),
            entry,
            attempt,
        })
    }

    pub fn entry(&self) -> &PuzzleEntry {
        &self.entry
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn attempt(&self) -> &PuzzleAttempt {
        &self.attempt
    }

    pub fn attempt_mut(&mut self) -> &mut PuzzleAttempt {
        &mut self.attempt
    }

    /// Resume index stored by [`GameSession::advance`]
    pub fn next_index(&self) -> u32 {
        self.next_index
    }

    /// Buy the next letter. Asking for a hint taints the attempt even when
    /// the hint cannot be given.
    pub async fn hint(&mut self) -> Result<HintOutcome> {
        self.attempt.mark_hint_used();

        let balance = self.ledger.coupons().await;
        if balance < HINT_COST {
            return Ok(HintOutcome::NotAffordable { balance });
        }
        let Some(slot) = self.attempt.hint_slot() else {
            return Ok(HintOutcome::Unavailable);
        };

        match self.ledger.try_spend(HINT_COST).await? {
            Some(balance) => {
                let letter = self.attempt.reveal(slot);
                Ok(HintOutcome::Revealed { letter, balance })
            }
            None => Ok(HintOutcome::NotAffordable {
                balance: self.ledger.coupons().await,
            }),
        }
    }

    /// Check the placed letters and record a win when they spell the answer
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        if !self.attempt.can_confirm() {
            return Ok(SubmitOutcome::Incomplete);
        }
        if !self.attempt.is_correct() {
            return Ok(SubmitOutcome::Incorrect);
        }

        let options = WinOptions {
            used_hint: self.attempt.hint_used(),
        };
        let outcome = self
            .ledger
            .apply_win(&self.topic_id, self.difficulty, self.index, options)
            .await?;

        Ok(SubmitOutcome::Solved {
            outcome,
            next_index: self.next_index(),
        })
    }

    pub fn retry(&mut self) {
        self.attempt.reset();
    }

    /// Store the next resume index and open the puzzle it points at
    pub async fn advance(self, catalog: &Catalog) -> Result<GameSession> {
        let next = self.next_index();
        self.ledger
            .set_topic_index(&self.topic_id, self.difficulty, next)
            .await?;
        GameSession::start(self.ledger, catalog, &self.topic_id, self.difficulty).await
    }
}
