//! Terminal handler: runs the dialog for the update and stops the chain.

use async_trait::async_trait;
use dbot_core::{Handler, HandlerResponse, Result, Update};
use dialog::DialogService;
use tracing::{instrument, warn};

#[derive(Clone)]
pub struct DialogHandler {
    service: DialogService,
}

impl DialogHandler {
    pub fn new(service: DialogService) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &DialogService {
        &self.service
    }
}

#[async_trait]
impl Handler for DialogHandler {
    #[instrument(skip(self, update))]
    async fn handle(&self, update: &Update) -> Result<HandlerResponse> {
        let report = self.service.handle(update).await;
        // The executor already recovered the session and told the user.
        if let Some(e) = &report.error {
            warn!(
                error = %e,
                user_id = update.user.id,
                executed = report.executed,
                "Dialog effects aborted"
            );
        }
        Ok(HandlerResponse::Stop)
    }
}
