//! Dialog config: catalog source and values shown on static screens.

use dialog::EngineSettings;
use std::env;

#[derive(Debug, Clone)]
pub struct DialogConfig {
    /// BOT_USERNAME, used in referral links
    pub bot_username: String,
    /// SUBSCRIPTION_PRICE
    pub subscription_price: String,
    /// CATALOG_FILE; the built-in catalog is used when unset
    pub catalog_file: Option<String>,
}

impl DialogConfig {
    pub fn from_env() -> Self {
        let defaults = EngineSettings::default();
        Self {
            bot_username: env::var("BOT_USERNAME")
                .ok()
                .map(|s| s.trim_start_matches('@').to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.bot_username),
            subscription_price: env::var("SUBSCRIPTION_PRICE")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.subscription_price),
            catalog_file: env::var("CATALOG_FILE").ok().filter(|s| !s.is_empty()),
        }
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            bot_username: self.bot_username.clone(),
            subscription_price: self.subscription_price.clone(),
        }
    }
}
