//! Dispatcher that feeds text messages and callback queries through a [`HandlerChain`].
//!
//! teloxide's dispatcher processes updates of one chat sequentially, so the chain sees each
//! chat's updates in arrival order. Handlers must not be spawned per update.

use anyhow::Result;
use dbot_core::ToCoreUpdate;
use handler_chain::HandlerChain;
use teloxide::{
    dispatching::{Dispatcher, UpdateFilterExt},
    error_handlers::LoggingErrorHandler,
    prelude::*,
    types::{CallbackQuery, Message},
};
use tracing::{debug, error, info};

use crate::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

async fn run_chain(chain: &HandlerChain, update: dbot_core::Update) {
    if let Err(e) = chain.handle(&update).await {
        error!(
            error = %e,
            user_id = update.user.id,
            chat_id = update.chat.id,
            kind = update.kind_name(),
            "Handler chain failed"
        );
    }
}

async fn on_message(msg: Message, chain: HandlerChain) -> ResponseResult<()> {
    match TelegramMessageWrapper(&msg).to_core() {
        Some(update) => run_chain(&chain, update).await,
        None => debug!(chat_id = msg.chat.id.0, "Skipping non-text message"),
    }
    Ok(())
}

async fn on_callback(query: CallbackQuery, chain: HandlerChain) -> ResponseResult<()> {
    match TelegramCallbackWrapper(&query).to_core() {
        Some(update) => run_chain(&chain, update).await,
        None => debug!(user_id = query.from.id.0, "Skipping callback without data"),
    }
    Ok(())
}

/// Runs the long-polling dispatcher until Ctrl+C.
pub async fn run_dispatcher(bot: teloxide::Bot, chain: HandlerChain) -> Result<()> {
    info!(handlers = chain.len(), "Starting dispatcher");

    let handler = dptree::entry()
        .branch(teloxide::types::Update::filter_message().endpoint(on_message))
        .branch(teloxide::types::Update::filter_callback_query().endpoint(on_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![chain])
        .default_handler(|upd| async move {
            debug!(update_id = upd.id.0, "Unhandled update kind");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "An error has occurred in the dispatcher",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}
