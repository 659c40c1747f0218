//! Record a solved clue without playing it.

use anyhow::{bail, Result};
use crossword_shared::achievements::{format_achievement_unlock, newly_unlocked};
use crossword_shared::{Difficulty, WinOptions};
use owo_colors::OwoColorize;
use std::fmt::Write as _;

use crate::context::AppContext;

pub async fn run(
    ctx: &AppContext,
    topic_id: &str,
    difficulty: Difficulty,
    index: Option<u32>,
    used_hint: bool,
) -> Result<String> {
    let topic = ctx.catalog.require_topic(topic_id)?;
    let len = topic.bucket(difficulty).len() as u32;
    let index = match index {
        Some(i) => i,
        None => ctx.ledger.get_topic_index(topic_id, difficulty).await.min(len.saturating_sub(1)),
    };
    if index >= len {
        bail!("{} has {} {} clues, no index {}", topic_id, len, difficulty, index);
    }

    let before = ctx.ledger.stats().await;
    let unlocks_before = ctx.ledger.unlocks().await;
    let outcome = ctx
        .ledger
        .apply_win(topic_id, difficulty, index, WinOptions { used_hint })
        .await?;

    let mut out = String::new();
    if !outcome.first_time {
        let _ = writeln!(
            out,
            "{} {}:{}:{} was already rewarded",
            "[SKIP]".yellow(),
            topic_id,
            difficulty,
            index
        );
        return Ok(out);
    }

    let _ = writeln!(
        out,
        "{} +{} coupons (balance {})",
        "[WIN]".green(),
        outcome.reward,
        ctx.ledger.coupons().await
    );

    let unlocks_after = ctx.ledger.unlocks().await;
    for d in Difficulty::ALL {
        if unlocks_after.is_unlocked(d) && !unlocks_before.is_unlocked(d) {
            let _ = writeln!(out, "{} {} puzzles are now open", "[UNLOCK]".cyan(), d);
        }
    }

    let after = ctx.ledger.stats().await;
    for id in newly_unlocked(&before, &after, &ctx.catalog.totals()) {
        let _ = writeln!(out, "{}", format_achievement_unlock(id));
    }
    Ok(out)
}
