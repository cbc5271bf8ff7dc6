//! Records the sender's transport identity before the dialog sees the update.

use std::sync::Arc;

use async_trait::async_trait;
use dbot_core::{Handler, Result, Update};
use storage::{NewUser, PersistenceGateway};
use tracing::{error, instrument};

/// Upserts the sender into `users` in before(). A storage failure is logged and the chain
/// continues, so the user still gets an answer.
#[derive(Clone)]
pub struct UserSyncHandler {
    gateway: Arc<dyn PersistenceGateway>,
}

impl UserSyncHandler {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl Handler for UserSyncHandler {
    #[instrument(skip(self, update), fields(user_id = update.user.id))]
    async fn before(&self, update: &Update) -> Result<bool> {
        let user = NewUser {
            telegram_id: update.user.id,
            username: update.user.username.clone(),
            first_name: update.user.first_name.clone(),
            last_name: update.user.last_name.clone(),
        };
        if let Err(e) = self.gateway.upsert_user(&user).await {
            error!(error = %e, user_id = update.user.id, "Failed to sync user");
        }
        Ok(true)
    }
}
