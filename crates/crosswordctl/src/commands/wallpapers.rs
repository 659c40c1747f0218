use anyhow::Result;
use crossword_shared::wallpapers::WALLPAPERS;
use crossword_shared::PurchaseOutcome;
use owo_colors::OwoColorize;
use std::fmt::Write as _;

use super::{header, kv};
use crate::cli::WallpaperAction;
use crate::context::AppContext;

pub async fn run(ctx: &AppContext, action: Option<WallpaperAction>) -> Result<String> {
    match action {
        Some(WallpaperAction::Buy { id }) => buy(ctx, &id).await,
        None => list(ctx).await,
    }
}

async fn list(ctx: &AppContext) -> Result<String> {
    let owned = ctx.shop.owned().await?;
    let mut out = String::new();
    header(&mut out, "Wallpapers");
    kv(&mut out, "coupons", ctx.ledger.coupons().await);
    let _ = writeln!(out);

    for w in WALLPAPERS.iter() {
        let state = if owned.contains(w.id) {
            "owned".green().to_string()
        } else {
            format!("{} coupons", w.price)
        };
        let _ = writeln!(out, "  #{} {:12} {}", w.id, w.image, state);
    }
    Ok(out)
}

async fn buy(ctx: &AppContext, id: &str) -> Result<String> {
    let line = match ctx.shop.purchase(id).await? {
        PurchaseOutcome::Purchased { price, balance } => format!(
            "{} wallpaper #{} for {} coupons (balance {})",
            "[BOUGHT]".green(),
            id,
            price,
            balance
        ),
        PurchaseOutcome::AlreadyOwned => {
            format!("{} wallpaper #{} is already yours", "[OWNED]".cyan(), id)
        }
        PurchaseOutcome::InsufficientCoupons { price, balance } => format!(
            "{} wallpaper #{} costs {} coupons, you have {}",
            "[SHORT]".red(),
            id,
            price,
            balance
        ),
    };
    Ok(format!("{}\n", line))
}
