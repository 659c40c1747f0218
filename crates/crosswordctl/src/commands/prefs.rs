use anyhow::Result;
use crossword_shared::Toggle;

use super::{header, kv, on_off};
use crate::cli::Switch;
use crate::context::AppContext;

/// Apply any requested changes, then show all three toggles
pub async fn run(
    ctx: &AppContext,
    music: Option<Switch>,
    vibration: Option<Switch>,
    notifications: Option<Switch>,
) -> Result<String> {
    let changes = [
        (Toggle::Music, music),
        (Toggle::Vibration, vibration),
        (Toggle::Notifications, notifications),
    ];
    for (toggle, switch) in changes {
        if let Some(switch) = switch {
            ctx.prefs.set(toggle, switch.enabled()).await?;
        }
    }

    let prefs = ctx.prefs.load().await?;
    let mut out = String::new();
    header(&mut out, "Preferences");
    kv(&mut out, "music", on_off(prefs.music));
    kv(&mut out, "vibration", on_off(prefs.vibration));
    kv(&mut out, "notifications", on_off(prefs.notifications));
    Ok(out)
}
