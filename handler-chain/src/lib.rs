//! # Handler chain
//!
//! Runs every handler's `before` in order, then `handle` in order until one returns Stop, then
//! every `after` in reverse order with the final response. A `before` returning false ends the
//! update immediately.

use dbot_core::{Handler, HandlerResponse, Result, Update};
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Clone, Default)]
pub struct HandlerChain {
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler. Order matters: earlier handlers see the update first and finish last.
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Runs the chain for one update. Returns Stop if a handler stopped it, otherwise Continue.
    #[instrument(skip(self, update), fields(user_id = update.user.id, chat_id = update.chat.id, kind = update.kind_name()))]
    pub async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        debug!("step: handler_chain started");

        for (index, handler) in self.handlers.iter().enumerate() {
            if !handler.before(update).await? {
                info!(handler = index, "step: before returned false, chain stopped");
                return Ok(HandlerResponse::Stop);
            }
        }

        let mut final_response = HandlerResponse::Continue;
        for (index, handler) in self.handlers.iter().enumerate() {
            let response = handler.handle(update).await?;
            debug!(handler = index, response = ?response, "step: handler done");

            if response == HandlerResponse::Stop {
                final_response = HandlerResponse::Stop;
                break;
            }
        }

        for handler in self.handlers.iter().rev() {
            handler.after(update, &final_response).await?;
        }

        debug!(response = ?final_response, "step: handler_chain finished");
        Ok(final_response)
    }
}
