//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Tests substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{Bot as CoreBot, DbotError, Keyboard, MessageId as CoreMessageId, Result};
use teloxide::{
    prelude::*,
    types::{CallbackQueryId, ChatId, InlineKeyboardButton, InlineKeyboardMarkup, MessageId},
};
use tracing::debug;

/// Converts a core keyboard to Telegram's inline markup, row for row.
pub fn to_inline_markup(keyboard: &Keyboard) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
        row.iter()
            .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.data.clone()))
            .collect::<Vec<_>>()
    }))
}

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

fn bot_error(e: teloxide::RequestError) -> DbotError {
    DbotError::transport(e)
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<CoreMessageId> {
        let mut request = self.bot.send_message(ChatId(chat_id), text.to_string());
        if let Some(keyboard) = keyboard {
            request = request.reply_markup(to_inline_markup(keyboard));
        }
        let sent = request.await.map_err(bot_error)?;
        debug!(chat_id, message_id = sent.id.0, "Message sent");
        Ok(sent.id.0)
    }

    async fn delete_message(&self, chat_id: i64, message_id: CoreMessageId) -> Result<()> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await
            .map_err(bot_error)?;
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(CallbackQueryId(callback_id.to_string()))
            .await
            .map_err(bot_error)?;
        Ok(())
    }
}
