//! Achievements screen. Viewing it marks every unlocked badge as seen.

use anyhow::Result;
use crossword_shared::achievements::{check_achievements, format_achievements};
use owo_colors::OwoColorize;
use std::fmt::Write as _;

use super::header;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, mark_seen: bool) -> Result<String> {
    let stats = ctx.ledger.stats().await;
    let achievements = check_achievements(&stats, &ctx.catalog.totals());
    let unlocked: Vec<_> = achievements.iter().filter(|a| a.unlocked).map(|a| a.id).collect();
    let fresh = ctx.seen.new_achievements(&unlocked).await?;

    let mut out = String::new();
    header(&mut out, "Achievements");

    let badges = format_achievements(&achievements, 6);
    if !badges.is_empty() {
        let _ = writeln!(out, "  {}", badges);
        let _ = writeln!(out);
    }

    for a in &achievements {
        let marker = if fresh.contains(&a.id) {
            " NEW".yellow().bold().to_string()
        } else {
            String::new()
        };
        if a.unlocked {
            let _ = writeln!(out, "  {:5} {}{}", a.badge, a.title.green(), marker);
        } else {
            let (current, target) = a.progress;
            let _ = writeln!(
                out,
                "  {:5} {} ({}/{})",
                "[ ]",
                a.title.dimmed(),
                current,
                target
            );
        }
        let _ = writeln!(out, "        {}", a.description.dimmed());
    }

    if mark_seen {
        ctx.seen.mark_seen(&unlocked).await?;
    }
    Ok(out)
}
