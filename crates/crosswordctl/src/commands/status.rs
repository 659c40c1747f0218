//! Status: balance, completions, tier unlocks and the new-achievement dot.

use anyhow::Result;
use crossword_shared::achievements::unlocked_achievements;
use crossword_shared::unlock::UNLOCK_THRESHOLD;
use crossword_shared::Difficulty;
use owo_colors::OwoColorize;

use super::{header, kv, section, THIN_SEP};
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, json: bool) -> Result<String> {
    let snapshot = ctx.ledger.snapshot().await;
    let unlocks = snapshot.unlocks();
    let totals = ctx.catalog.totals();
    let unlocked = unlocked_achievements(&ctx.ledger.stats().await, &totals);
    let has_new = ctx.seen.has_new(&unlocked).await?;

    if json {
        let value = serde_json::json!({
            "ledger": snapshot,
            "unlocks": unlocks,
            "achievements_unlocked": unlocked,
            "has_new_achievements": has_new,
        });
        return Ok(format!("{}\n", serde_json::to_string_pretty(&value)?));
    }

    let mut out = String::new();
    header(&mut out, "Heritage Crossword");

    section(&mut out, "COUPONS");
    kv(&mut out, "balance", snapshot.coupons.bold());

    section(&mut out, "PROGRESS");
    for difficulty in Difficulty::ALL {
        let total = totals.for_difficulty(difficulty);
        let line = match snapshot.completed_for(difficulty) {
            Some(done) => format!("{}/{}", done, total),
            None => format!("{} puzzles", total),
        };
        let state = if unlocks.is_unlocked(difficulty) {
            "open".green().to_string()
        } else {
            let mut state = "locked".red().to_string();
            if let Some(below) = difficulty.previous() {
                let done = snapshot.completed_for(below).unwrap_or(0);
                state.push_str(&format!(
                    " ({}/{} {})",
                    done.min(UNLOCK_THRESHOLD),
                    UNLOCK_THRESHOLD,
                    below
                ));
            }
            state
        };
        kv(&mut out, difficulty.as_str(), format!("{:10} {}", line, state));
    }
    kv(&mut out, "total", snapshot.completed_total);
    kv(&mut out, "no-hint wins", snapshot.no_hint_wins);

    section(&mut out, "ACHIEVEMENTS");
    let dot = if has_new {
        "new".yellow().bold().to_string()
    } else {
        "-".dimmed().to_string()
    };
    kv(&mut out, "unlocked", format!("{} of 6", unlocked.len()));
    kv(&mut out, "unseen", dot);

    out.push('\n');
    out.push_str(THIN_SEP);
    out.push('\n');
    Ok(out)
}
