//! Bot configuration: BaseConfig (Telegram + log + DB) + DialogConfig (catalog, static screens).

mod base;
mod bot_config;
mod dialog_config;

#[cfg(test)]
mod tests;

pub use base::BaseConfig;
pub use bot_config::BotConfig;
pub use dialog_config::DialogConfig;
