//! crosswordctl - command line front end for the heritage crossword ledger.

pub mod cli;
pub mod commands;
pub mod context;

pub use cli::{Cli, Commands};
pub use context::{load_config, AppContext};
