//! # work-bot
//!
//! Work-board Telegram bot application: env config, CLI, chain handlers, component wiring and
//! the runner. The dialog itself lives in the `dialog` crate.

mod cli;
mod components;
pub mod config;
pub mod handlers;
mod runner;

pub use cli::{check_catalog, load_config, Cli, Commands};
pub use components::{
    build_bot_components, build_gateway, build_handler_chain, load_catalog, BotComponents,
};
pub use config::{BaseConfig, BotConfig, DialogConfig};
pub use handlers::{DialogHandler, LoggingHandler, UserSyncHandler};
pub use runner::{run_bot, WorkBot};
