//! Command line: run the bot or check a catalog file.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::components::load_catalog;
use crate::config::BotConfig;

#[derive(Parser)]
#[command(name = "work-bot")]
#[command(about = "Work-board Telegram bot", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the Telegram bot (config from env; token can override BOT_TOKEN).
    Run {
        #[arg(short, long)]
        token: Option<String>,
    },
    /// Load and validate a catalog file (CATALOG_FILE when --file is omitted).
    CheckCatalog {
        #[arg(short, long)]
        file: Option<String>,
    },
}

/// Load BotConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<BotConfig> {
    BotConfig::load(token)
}

/// Returns a one-line summary of the catalog.
pub fn check_catalog(file: Option<String>) -> Result<String> {
    let file = file.or_else(|| std::env::var("CATALOG_FILE").ok());
    let catalog = load_catalog(file.as_deref())?;
    let subcategories: usize = catalog
        .categories
        .iter()
        .map(|c| c.subcategories.len())
        .sum();
    Ok(format!(
        "{}: {} categories, {} subcategories, {} cities",
        file.as_deref().unwrap_or("built-in catalog"),
        catalog.categories.len(),
        subcategories,
        catalog.cities.len()
    ))
}
