//! Command handlers for crosswordctl.
//!
//! Each handler renders into a `String` so output can be checked in tests;
//! `run` prints it.

pub mod achievements;
pub mod facts;
pub mod index;
pub mod play;
pub mod prefs;
pub mod spend;
pub mod status;
pub mod topics;
pub mod wallpapers;
pub mod win;

use anyhow::Result;
use crossword_shared::CrosswordError;
use owo_colors::OwoColorize;
use std::fmt::Write as _;

use crate::cli::Commands;
use crate::context::AppContext;

pub(crate) const THIN_SEP: &str = "------------------------------------------------------------";

/// Key width for aligned key/value lines
const KW: usize = 15;

pub async fn run(ctx: &AppContext, command: Commands) -> Result<()> {
    let output = match command {
        Commands::Status { json } => status::run(ctx, json).await?,
        Commands::Topics => topics::run(ctx).await?,
        Commands::Play { topic, difficulty } => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            return play::run(ctx, &topic, difficulty, stdin.lock(), &mut stdout).await;
        }
        Commands::Win {
            topic,
            difficulty,
            index,
            used_hint,
        } => win::run(ctx, &topic, difficulty, index, used_hint).await?,
        Commands::Spend { amount } => spend::run(ctx, amount).await?,
        Commands::Index {
            topic,
            difficulty,
            set,
        } => index::run(ctx, &topic, difficulty, set).await?,
        Commands::Achievements { no_mark } => achievements::run(ctx, !no_mark).await?,
        Commands::Facts { id } => facts::run(ctx, id.as_deref()).await?,
        Commands::Wallpapers { action } => wallpapers::run(ctx, action).await?,
        Commands::Prefs {
            music,
            vibration,
            notifications,
        } => prefs::run(ctx, music, vibration, notifications).await?,
    };
    print!("{}", output);
    Ok(())
}

/// One-line error report. Failures from the shared crate carry their code.
pub fn error_line(err: &anyhow::Error) -> String {
    let code = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<CrosswordError>())
        .map(|e| format!(" (code {})", e.code()))
        .unwrap_or_default();
    format!("{} {:#}{}", "error:".red().bold(), err, code)
}

pub(crate) fn header(out: &mut String, title: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}", title.bold());
    let _ = writeln!(out, "{}", THIN_SEP);
}

pub(crate) fn section(out: &mut String, name: &str) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", format!("[{}]", name).cyan());
}

pub(crate) fn kv(out: &mut String, key: &str, value: impl std::fmt::Display) {
    let _ = writeln!(out, "  {:width$} {}", key, value, width = KW);
}

pub(crate) fn on_off(enabled: bool) -> String {
    if enabled {
        "on".green().to_string()
    } else {
        "off".dimmed().to_string()
    }
}
