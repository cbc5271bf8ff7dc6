//! Config tests.

use crate::config::BotConfig;
use serial_test::serial;
use std::env;

const VARS: &[&str] = &[
    "BOT_TOKEN",
    "DATABASE_URL",
    "LOG_FILE",
    "TELEGRAM_API_URL",
    "TELOXIDE_API_URL",
    "BOT_USERNAME",
    "SUBSCRIPTION_PRICE",
    "CATALOG_FILE",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_load_config_with_defaults() {
    clear_env();
    env::set_var("BOT_TOKEN", "test_token");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "test_token");
    assert!(config.telegram_api_url().is_none());
    assert_eq!(config.database_url(), "file:./work_bot.db");
    assert_eq!(config.log_file(), "logs/work-bot.log");
    assert_eq!(config.dialog().bot_username, "work_kg_bot");
    assert_eq!(config.dialog().subscription_price, "500 сом/месяц");
    assert!(config.catalog_file().is_none());
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_load_config_with_custom_values() {
    clear_env();
    env::set_var("BOT_TOKEN", "custom_token");
    env::set_var("DATABASE_URL", "custom.db");
    env::set_var("LOG_FILE", "/tmp/work.log");
    env::set_var("BOT_USERNAME", "@jumush_bot");
    env::set_var("SUBSCRIPTION_PRICE", "300 сом/месяц");
    env::set_var("CATALOG_FILE", "catalog.toml");

    let config = BotConfig::load(None).unwrap();

    assert_eq!(config.bot_token(), "custom_token");
    assert_eq!(config.database_url(), "custom.db");
    assert_eq!(config.log_file(), "/tmp/work.log");
    assert_eq!(config.dialog().bot_username, "jumush_bot");
    assert_eq!(
        config.dialog().engine_settings().subscription_price,
        "300 сом/месяц"
    );
    assert_eq!(config.catalog_file(), Some("catalog.toml"));
    clear_env();
}

#[test]
#[serial]
fn test_token_argument_overrides_env() {
    clear_env();
    env::set_var("BOT_TOKEN", "env_token");

    let config = BotConfig::load(Some("cli_token".to_string())).unwrap();

    assert_eq!(config.bot_token(), "cli_token");
    clear_env();
}

#[test]
#[serial]
fn test_missing_token_is_an_error() {
    clear_env();
    assert!(BotConfig::load(None).is_err());
}

#[test]
#[serial]
fn test_teloxide_api_url_fallback_and_validation() {
    clear_env();
    env::set_var("BOT_TOKEN", "t");
    env::set_var("TELOXIDE_API_URL", "http://localhost:8081");

    let config = BotConfig::load(None).unwrap();
    assert_eq!(config.telegram_api_url(), Some("http://localhost:8081"));
    assert!(config.validate().is_ok());
    assert_eq!(
        config.telegram().telegram_api_url.as_deref(),
        Some("http://localhost:8081")
    );

    env::set_var("TELEGRAM_API_URL", "not a url");
    let config = BotConfig::load(None).unwrap();
    assert!(config.validate().is_err());
    clear_env();
}
