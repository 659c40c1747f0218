use anyhow::Result;
use crossword_shared::{Difficulty, PuzzleInstanceId};
use owo_colors::OwoColorize;
use std::fmt::Write as _;

use super::{header, section};
use crate::context::AppContext;

/// Topics with per-tier resume position and solved count
pub async fn run(ctx: &AppContext) -> Result<String> {
    let snapshot = ctx.ledger.snapshot().await;
    let mut out = String::new();
    header(&mut out, "Topics");

    for topic in ctx.catalog.topics() {
        section(&mut out, &topic.id.to_uppercase());
        let _ = writeln!(out, "  {}", topic.title.bold());
        for difficulty in Difficulty::ALL {
            let len = topic.bucket(difficulty).len() as u32;
            let solved = (0..len)
                .filter(|&i| snapshot.is_completed(&PuzzleInstanceId::new(&topic.id, difficulty, i)))
                .count();
            let next = snapshot.topic_index(&topic.id, difficulty);
            let _ = writeln!(
                out,
                "  {:8} next #{}   solved {}/{}",
                difficulty.as_str(),
                next,
                solved,
                len
            );
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::memory_context;
    use crossword_shared::WinOptions;

    #[tokio::test]
    async fn test_topics_report_solved_and_resume() {
        let ctx = memory_context().await;
        ctx.ledger
            .apply_win("arch", Difficulty::Easy, 1, WinOptions::default())
            .await
            .unwrap();
        ctx.ledger
            .set_topic_index("arch", Difficulty::Easy, 0)
            .await
            .unwrap();

        let out = run(&ctx).await.unwrap();
        assert!(out.contains("[ARCH]"));
        assert!(out.contains("next #0   solved 1/2"));
    }
}
