//! # ticq-telegram
//!
//! Telegram side of ticq: converts teloxide messages into [`ticq_core::PlatformUpdate`]s,
//! implements [`ticq_core::Transport`] over the Bot API, loads config, and runs the login loop.

mod adapters;
mod bot;
mod config;
mod runner;
mod transport;

pub use adapters::{chat_kind, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot::build_bot;
pub use config::{parse_chat_list, TicqConfig};
pub use runner::{login, wait_for_shutdown_signal};
pub use transport::{input_file, TelegramTransport};
