use anyhow::Result;
use dbot_core::{init_tracing, Update};
use dbot_telegram::{run_dispatcher, TelegramBotAdapter};
use handler_chain::HandlerChain;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::components::{build_bot_components, build_gateway, build_handler_chain, BotComponents};
use crate::config::BotConfig;

/// Config, components and the handler chain built from them.
pub struct WorkBot {
    pub config: BotConfig,
    pub components: BotComponents,
    pub handler_chain: HandlerChain,
}

impl WorkBot {
    /// Opens the database and builds components with the given transport.
    pub async fn new(config: BotConfig, bot: Arc<dyn dbot_core::Bot>) -> Result<Self> {
        let gateway = build_gateway(config.database_url()).await?;
        let components = build_bot_components(&config, bot, gateway)?;
        let handler_chain = build_handler_chain(&components);
        Ok(Self {
            config,
            components,
            handler_chain,
        })
    }

    /// Drives the handler chain with a core update (for integration tests).
    pub async fn handle_update(&self, update: &Update) -> Result<()> {
        if let Err(e) = self.handler_chain.handle(update).await {
            error!(error = %e, user_id = update.user.id, "Handler chain failed");
        }
        Ok(())
    }
}

/// Initializes tracing, validates config, builds the bot and runs the dispatcher until Ctrl+C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    init_tracing(config.log_file())?;
    config.validate()?;

    info!(
        database_url = %config.database_url(),
        catalog_file = ?config.catalog_file(),
        "Initializing bot"
    );

    let teloxide_bot = config.telegram().build_bot()?;
    let adapter: Arc<dyn dbot_core::Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let bot = WorkBot::new(config, adapter).await?;

    info!("Bot started successfully");
    run_dispatcher(teloxide_bot, bot.handler_chain).await
}
