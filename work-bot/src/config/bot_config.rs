//! BotConfig: BaseConfig + DialogConfig. Use load() for env-based loading.

use anyhow::Result;
use dbot_telegram::TelegramConfig;

use super::{BaseConfig, DialogConfig};

pub struct BotConfig {
    pub base: BaseConfig,
    pub dialog: DialogConfig,
}

impl BotConfig {
    /// Load full config from environment variables. If `token` is provided it overrides BOT_TOKEN.
    /// Call validate() after load to check config before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let base = BaseConfig::load(token)?;
        let dialog = DialogConfig::from_env();
        Ok(Self { base, dialog })
    }

    pub fn validate(&self) -> Result<()> {
        self.base.validate()
    }

    pub fn base(&self) -> &BaseConfig {
        &self.base
    }
    pub fn dialog(&self) -> &DialogConfig {
        &self.dialog
    }

    pub fn bot_token(&self) -> &str {
        &self.base.bot_token
    }
    pub fn database_url(&self) -> &str {
        &self.base.database_url
    }
    pub fn log_file(&self) -> &str {
        &self.base.log_file
    }
    pub fn telegram_api_url(&self) -> Option<&str> {
        self.base.telegram_api_url.as_deref()
    }
    pub fn catalog_file(&self) -> Option<&str> {
        self.dialog.catalog_file.as_deref()
    }

    /// Connectivity part handed to the transport.
    pub fn telegram(&self) -> TelegramConfig {
        let config = TelegramConfig::with_token(self.base.bot_token.clone());
        match &self.base.telegram_api_url {
            Some(url) => config.with_api_url(url.clone()),
            None => config,
        }
    }
}
