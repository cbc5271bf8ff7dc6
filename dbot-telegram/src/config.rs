//! Telegram connectivity: token and optional self-hosted Bot API URL.

use anyhow::Result;

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
}

impl TelegramConfig {
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.telegram_api_url = Some(url.into());
        self
    }

    /// Builds the teloxide bot, pointing it at the custom API URL when one is set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(&self.bot_token);
        match &self.telegram_api_url {
            Some(url) => {
                let url = reqwest::Url::parse(url).map_err(|e| {
                    anyhow::anyhow!("Invalid Telegram API URL {}: {}", url, e)
                })?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token() {
        let config = TelegramConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
        assert!(config.build_bot().is_ok());
    }

    #[test]
    fn test_build_bot_rejects_bad_url() {
        let config = TelegramConfig::with_token("t".to_string()).with_api_url("not a url");
        assert!(config.build_bot().is_err());

        let config =
            TelegramConfig::with_token("t".to_string()).with_api_url("http://localhost:8081");
        assert!(config.build_bot().is_ok());
    }
}
