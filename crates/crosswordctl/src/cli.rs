//! Command line definition.

use clap::{Parser, Subcommand, ValueEnum};
use crossword_shared::{Difficulty, StorageBackend};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "crosswordctl")]
#[command(about = "Heritage crossword - progress, coupons and rewards", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $CROSSWORD_CONFIG or ~/.config/heritage-crossword/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured storage backend (sqlite, file, memory)
    #[arg(long, global = true)]
    pub store: Option<StorageBackend>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show coupons, completions and unlocked tiers
    Status {
        /// Print the raw ledger as JSON
        #[arg(long)]
        json: bool,
    },

    /// List topics and their resume positions
    Topics,

    /// Play the current clue of a topic interactively
    Play {
        topic: String,
        difficulty: Difficulty,
    },

    /// Record a solved clue
    Win {
        topic: String,
        difficulty: Difficulty,

        /// Clue index (defaults to the stored resume index)
        #[arg(long)]
        index: Option<u32>,

        /// The clue was solved with a hint
        #[arg(long)]
        used_hint: bool,
    },

    /// Spend coupons
    Spend { amount: u64 },

    /// Show or set a resume index
    Index {
        topic: String,
        difficulty: Difficulty,

        #[arg(long)]
        set: Option<u32>,
    },

    /// Show achievements (marks unlocked ones as seen)
    Achievements {
        /// Leave the new-achievement indicator alone
        #[arg(long)]
        no_mark: bool,
    },

    /// Show heritage facts unlocked by solved clues
    Facts {
        /// Show a single fact
        id: Option<String>,
    },

    /// List wallpapers or buy one
    Wallpapers {
        #[command(subcommand)]
        action: Option<WallpaperAction>,
    },

    /// Show or change player preferences
    Prefs {
        #[arg(long)]
        music: Option<Switch>,

        #[arg(long)]
        vibration: Option<Switch>,

        #[arg(long)]
        notifications: Option<Switch>,
    },
}

#[derive(Subcommand, Debug)]
pub enum WallpaperAction {
    /// Buy a wallpaper with coupons
    Buy { id: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn enabled(self) -> bool {
        matches!(self, Switch::On)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_win_with_flags() {
        let cli = Cli::parse_from([
            "crosswordctl",
            "--store",
            "memory",
            "win",
            "arts",
            "Hard",
            "--index",
            "1",
            "--used-hint",
        ]);
        assert_eq!(cli.store, Some(StorageBackend::Memory));
        match cli.command {
            Commands::Win {
                topic,
                difficulty,
                index,
                used_hint,
            } => {
                assert_eq!(topic, "arts");
                assert_eq!(difficulty, Difficulty::Hard);
                assert_eq!(index, Some(1));
                assert!(used_hint);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_wallpaper_buy() {
        let cli = Cli::parse_from(["crosswordctl", "wallpapers", "buy", "3"]);
        assert!(matches!(
            cli.command,
            Commands::Wallpapers {
                action: Some(WallpaperAction::Buy { ref id })
            } if id == "3"
        ));
    }

    #[test]
    fn test_parse_prefs_switches() {
        let cli = Cli::parse_from(["crosswordctl", "prefs", "--music", "on", "--vibration", "off"]);
        match cli.command {
            Commands::Prefs {
                music,
                vibration,
                notifications,
            } => {
                assert_eq!(music, Some(Switch::On));
                assert_eq!(vibration, Some(Switch::Off));
                assert_eq!(notifications, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_facts_with_and_without_id() {
        let cli = Cli::parse_from(["crosswordctl", "facts"]);
        assert!(matches!(cli.command, Commands::Facts { id: None }));

        let cli = Cli::parse_from(["crosswordctl", "facts", "f3"]);
        assert!(matches!(
            cli.command,
            Commands::Facts { id: Some(ref id) } if id == "f3"
        ));
    }

    #[test]
    fn test_bad_difficulty_is_rejected() {
        assert!(Cli::try_parse_from(["crosswordctl", "play", "arts", "legendary"]).is_err());
    }
}
