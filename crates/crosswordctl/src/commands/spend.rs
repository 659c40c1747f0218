use anyhow::Result;
use owo_colors::OwoColorize;

use crate::context::AppContext;

/// Debit coupons; the balance never goes below zero
pub async fn run(ctx: &AppContext, amount: u64) -> Result<String> {
    let before = ctx.ledger.coupons().await;
    let balance = ctx.ledger.consume_coupons(amount).await?;
    let spent = before.saturating_sub(balance);
    Ok(format!(
        "{} {} coupons (balance {})\n",
        "[SPEND]".yellow(),
        spent,
        balance.bold()
    ))
}
