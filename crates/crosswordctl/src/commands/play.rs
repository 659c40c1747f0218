//! Interactive play over a line-based input.
//!
//! Letters pick from the bank, `?` buys a hint, `<` removes the last letter,
//! `-` starts the clue over, `!` confirms. Several can go on one line. A line
//! holding only `:q` quits, so every letter stays typeable on its own line.
//! A solved clue moves the topic on to its next clue and ends the run.

use anyhow::Result;
use crossword_shared::achievements::{format_achievement_unlock, newly_unlocked};
use crossword_shared::session::{SlotFeedback, HINT_COST};
use crossword_shared::{Difficulty, GameSession, HintOutcome, SubmitOutcome};
use owo_colors::OwoColorize;
use std::io::{BufRead, Write};

use super::THIN_SEP;
use crate::context::AppContext;

const QUIT: &str = ":q";

pub async fn run<R: BufRead, W: Write>(
    ctx: &AppContext,
    topic_id: &str,
    difficulty: Difficulty,
    input: R,
    out: &mut W,
) -> Result<()> {
    let mut session =
        GameSession::start(ctx.ledger.clone(), &ctx.catalog, topic_id, difficulty).await?;
    let before = ctx.ledger.stats().await;

    writeln!(out)?;
    writeln!(
        out,
        "  {} / {} / clue #{}",
        topic_id.bold(),
        difficulty,
        session.index()
    )?;
    writeln!(out, "{}", THIN_SEP)?;
    render(&session, out)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line == QUIT {
            break;
        }

        for c in line.chars() {
            match c {
                '?' => report_hint(session.hint().await?, out)?,
                '<' => {
                    session.attempt_mut().backspace();
                }
                '-' => session.retry(),
                '!' => match session.submit().await? {
                    SubmitOutcome::Incomplete => writeln!(out, "  fill every letter first")?,
                    SubmitOutcome::Incorrect => {
                        writeln!(out, "  {}", "not quite, try again".red())?
                    }
                    SubmitOutcome::Solved {
                        outcome,
                        next_index,
                    } => {
                        if outcome.first_time {
                            writeln!(
                                out,
                                "  {} +{} coupons",
                                "Solved!".green().bold(),
                                outcome.reward
                            )?;
                        } else {
                            writeln!(out, "  {} (already rewarded)", "Solved!".green().bold())?;
                        }
                        writeln!(out, "  {}", session.entry().fact.dimmed())?;

                        let after = ctx.ledger.stats().await;
                        for id in newly_unlocked(&before, &after, &ctx.catalog.totals()) {
                            writeln!(out, "  {}", format_achievement_unlock(id))?;
                        }

                        session.advance(&ctx.catalog).await?;
                        writeln!(out, "  next clue is #{}", next_index)?;
                        return Ok(());
                    }
                },
                c if c.is_ascii_alphabetic() => match session.attempt_mut().pick_letter(c) {
                    Some(SlotFeedback::Correct) => {}
                    Some(SlotFeedback::Wrong) => writeln!(out, "  {} is wrong here", c.red())?,
                    None => writeln!(out, "  no free {} in the bank", c.to_ascii_uppercase())?,
                },
                c if c.is_whitespace() => {}
                other => writeln!(out, "  unknown key '{}'", other)?,
            }
        }
        render(&session, out)?;
    }
    Ok(())
}

fn report_hint<W: Write>(outcome: HintOutcome, out: &mut W) -> std::io::Result<()> {
    match outcome {
        HintOutcome::Revealed { letter, balance } => writeln!(
            out,
            "  hint: {} (-{} coupons, balance {})",
            letter.yellow(),
            HINT_COST,
            balance
        ),
        HintOutcome::NotAffordable { balance } => writeln!(
            out,
            "  a hint costs {} coupons, you have {}",
            HINT_COST, balance
        ),
        HintOutcome::Unavailable => writeln!(out, "  nothing left to reveal"),
    }
}

fn render<W: Write>(session: &GameSession, out: &mut W) -> std::io::Result<()> {
    let attempt = session.attempt();
    let picked: Vec<char> = attempt.picked().chars().collect();
    let slots: Vec<String> = (0..attempt.answer_len())
        .map(|i| picked.get(i).map_or("_".to_string(), |c| c.to_string()))
        .collect();
    let bank: Vec<String> = attempt
        .bank()
        .iter()
        .enumerate()
        .map(|(i, c)| if attempt.is_used(i) { ".".to_string() } else { c.to_string() })
        .collect();

    writeln!(out)?;
    writeln!(out, "  {}", session.entry().clue)?;
    writeln!(out, "  {}", slots.join(" ").bold())?;
    writeln!(out, "  {}", bank.join(" ").dimmed())?;
    if attempt.hint_used() {
        writeln!(out, "  {}", "(hint used)".dimmed())?;
    }
    Ok(())
}
