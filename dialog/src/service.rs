//! Entry point for inbound updates: lock session, transition, execute, commit.

use std::sync::Arc;

use dbot_core::{Bot, Update};
use storage::PersistenceGateway;
use tracing::{debug, instrument};

use crate::catalog::Catalog;
use crate::engine::{DialogEngine, EngineSettings};
use crate::event::Inbound;
use crate::executor::{EffectExecutor, ExecutionReport};
use crate::store::SessionStore;

#[derive(Clone)]
pub struct DialogService {
    engine: Arc<DialogEngine>,
    store: SessionStore,
    executor: EffectExecutor,
}

impl DialogService {
    pub fn new(
        catalog: Arc<Catalog>,
        settings: EngineSettings,
        bot: Arc<dyn Bot>,
        gateway: Arc<dyn PersistenceGateway>,
    ) -> Self {
        Self {
            engine: Arc::new(DialogEngine::new(catalog, settings)),
            store: SessionStore::new(),
            executor: EffectExecutor::new(bot, gateway),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn engine(&self) -> &DialogEngine {
        &self.engine
    }

    /// Processes one update. The identity's session stays locked until its effects have run,
    /// so a later update from the same identity sees the committed state.
    #[instrument(skip(self, update), fields(user_id = update.user.id, chat_id = update.chat.id, kind = update.kind_name()))]
    pub async fn handle(&self, update: &Update) -> ExecutionReport {
        let inbound = Inbound::from_update(update);
        let mut session = self.store.lock(update.user.id).await;

        let transition = self.engine.transition(&session, &inbound);
        debug!(
            from = session.state.name(),
            to = transition.session.state.name(),
            effects = transition.effects.len(),
            "Transition"
        );

        *session = transition.session;
        self.executor
            .execute(&mut session, inbound.chat_id, transition.effects)
            .await
    }
}
