//! Heritage facts. One opens per completed puzzle.

use anyhow::Result;
use owo_colors::OwoColorize;
use std::fmt::Write as _;

use super::{header, kv};
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, id: Option<&str>) -> Result<String> {
    let completed = ctx.ledger.snapshot().await.completed_total;
    let unlocked = ctx.facts.unlocked(completed);
    let mut out = String::new();
    header(&mut out, "Facts");

    if let Some(id) = id {
        let fact = ctx.facts.require(id)?;
        if unlocked.iter().any(|f| f.id == fact.id) {
            let _ = writeln!(out, "  {}", fact.text);
        } else {
            let needed = ctx.facts.wins_required(id).unwrap_or(0);
            let _ = writeln!(
                out,
                "  {} solve {} puzzle(s) to open it ({} so far)",
                "locked:".red(),
                needed,
                completed
            );
        }
        return Ok(out);
    }

    if unlocked.is_empty() {
        let _ = writeln!(out, "  {}", "No facts unlocked yet".dimmed());
        let _ = writeln!(out, "  Complete at least one crossword to unlock curated facts.");
        return Ok(out);
    }

    for fact in unlocked {
        let _ = writeln!(out, "  {:4} {}", fact.id.cyan(), fact.text);
    }
    let _ = writeln!(out);
    kv(
        &mut out,
        "unlocked",
        format!("{} of {}", unlocked.len(), ctx.facts.all().len()),
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::memory_context;
    use crossword_shared::{Difficulty, WinOptions};

    #[tokio::test]
    async fn test_no_facts_before_first_win() {
        let ctx = memory_context().await;
        let out = run(&ctx, None).await.unwrap();
        assert!(out.contains("No facts unlocked yet"));
    }

    #[tokio::test]
    async fn test_wins_open_facts_in_order() {
        let ctx = memory_context().await;
        for index in 0..2 {
            ctx.ledger
                .apply_win("thermal", Difficulty::Easy, index, WinOptions::default())
                .await
                .unwrap();
        }

        let out = run(&ctx, None).await.unwrap();
        assert!(out.contains("Roman times"));
        assert!(out.contains("Therme"));
        assert!(!out.contains("Thermal springs"));
        assert!(out.contains("2 of 6"));

        let single = run(&ctx, Some("f2")).await.unwrap();
        assert!(single.contains("Therme"));
        let locked = run(&ctx, Some("f5")).await.unwrap();
        assert!(locked.contains("solve 5 puzzle(s)"));
        assert!(run(&ctx, Some("f9")).await.is_err());
    }
}
