//! Logs each update in before() and the response in after(); always continues.

use async_trait::async_trait;
use dbot_core::{Handler, HandlerResponse, Result, Update, UpdateKind};
use tracing::{debug, info, instrument};

pub struct LoggingHandler;

fn payload(update: &Update) -> &str {
    match &update.kind {
        UpdateKind::Command { name, .. } => name,
        UpdateKind::Text { body, .. } => body,
        UpdateKind::Callback { data, .. } => data,
    }
}

#[async_trait]
impl Handler for LoggingHandler {
    #[instrument(skip(self, update))]
    async fn before(&self, update: &Update) -> Result<bool> {
        info!(
            user_id = update.user.id,
            chat_id = update.chat.id,
            username = %update.user.username.as_deref().unwrap_or("unknown"),
            kind = update.kind_name(),
            payload = %payload(update),
            "Received update"
        );
        Ok(true)
    }

    #[instrument(skip(self, update, response))]
    async fn after(&self, update: &Update, response: &HandlerResponse) -> Result<()> {
        debug!(
            user_id = update.user.id,
            response = ?response,
            "Processed update"
        );
        Ok(())
    }
}
