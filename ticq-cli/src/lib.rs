//! # ticq-cli
//!
//! Argument parsing, config loading and listener setup for the `ticq` binary.

pub mod cli;

pub use cli::{load_config, register_listeners, Cli, Commands};
pub use ticq_telegram::TicqConfig;
