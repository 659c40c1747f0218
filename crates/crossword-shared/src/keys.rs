//! Persistence key names.
//!
//! These match the keys the game has always written, so an existing store
//! keeps its progress.

pub const COUPONS: &str = "@baden_cross_coupons";
pub const COMPLETED_EASY: &str = "@baden_cross_completed_easy";
pub const COMPLETED_MEDIUM: &str = "@baden_cross_completed_medium";
pub const COMPLETED_HARD: &str = "@baden_cross_completed_hard";
pub const COMPLETED_TOTAL: &str = "@baden_cross_completed_total";
pub const NO_HINT_WINS: &str = "@baden_cross_no_hint_wins";
pub const TOPIC_PROGRESS: &str = "@baden_cross_progress_v1";
pub const COMPLETED_SET: &str = "@baden_cross_completed_set_v1";

pub const ACHIEVEMENTS_SEEN: &str = "@baden_achievements_seen_v1";
pub const WALLPAPERS_OWNED: &str = "@baden_wallpapers_owned_v1";

pub const PREF_MUSIC: &str = "baden_bg_music";
pub const PREF_VIBRATION: &str = "baden_vibration";
pub const PREF_NOTIFICATIONS: &str = "baden_notifications";
