use anyhow::Result;
use crossword_shared::Difficulty;

use crate::context::AppContext;

/// Show the resume index, or store a new one first
pub async fn run(
    ctx: &AppContext,
    topic_id: &str,
    difficulty: Difficulty,
    set: Option<u32>,
) -> Result<String> {
    ctx.catalog.require_topic(topic_id)?;
    if let Some(index) = set {
        ctx.ledger.set_topic_index(topic_id, difficulty, index).await?;
    }
    let index = ctx.ledger.get_topic_index(topic_id, difficulty).await;
    Ok(format!("{} {}: {}\n", topic_id, difficulty, index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::memory_context;

    #[tokio::test]
    async fn test_set_then_show() {
        let ctx = memory_context().await;
        assert_eq!(run(&ctx, "symbols", Difficulty::Hard, None).await.unwrap(), "symbols hard: 0\n");
        run(&ctx, "symbols", Difficulty::Hard, Some(1)).await.unwrap();
        assert_eq!(run(&ctx, "symbols", Difficulty::Hard, None).await.unwrap(), "symbols hard: 1\n");
        assert_eq!(ctx.ledger.get_topic_index("symbols", Difficulty::Easy).await, 0);
    }
}
