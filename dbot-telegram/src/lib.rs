//! # dbot-telegram
//!
//! Telegram transport: teloxide adapters to core updates, a [`dbot_core::Bot`] implementation,
//! connectivity config and the dispatcher that drives a handler chain.
//! Knows nothing about dialogs or persistence.

mod adapters;
mod bot_adapter;
mod config;
mod runner;

pub use adapters::{TelegramCallbackWrapper, TelegramMessageWrapper, TelegramUserWrapper};
pub use bot_adapter::{to_inline_markup, TelegramBotAdapter};
pub use config::TelegramConfig;
pub use runner::run_dispatcher;
