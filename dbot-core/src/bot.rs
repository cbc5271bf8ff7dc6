//! Bot abstraction for sending and deleting messages and acknowledging button presses.
//!
//! [`Bot`] trait is transport-agnostic; the teloxide implementation lives in dbot-telegram.

use crate::error::Result;
use crate::types::{Keyboard, MessageId};
use async_trait::async_trait;

/// Outbound transport operations. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends a text message (optionally with an inline keyboard) and returns the new message id.
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<&Keyboard>,
    ) -> Result<MessageId>;

    /// Deletes a message previously sent or received in the chat.
    async fn delete_message(&self, chat_id: i64, message_id: MessageId) -> Result<()>;

    /// Acknowledges a button press so the client stops its loading indicator.
    async fn answer_callback(&self, callback_id: &str) -> Result<()>;
}
