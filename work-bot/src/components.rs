//! Builds storage, catalog, dialog service and the handler chain from config.

use std::sync::Arc;

use anyhow::Result;
use dbot_core::Bot;
use dialog::{Catalog, DialogService};
use handler_chain::HandlerChain;
use storage::{PersistenceGateway, SqliteGateway};
use tracing::{error, info, instrument};

use crate::config::BotConfig;
use crate::handlers::{DialogHandler, LoggingHandler, UserSyncHandler};

/// Shared pieces the chain is built from.
#[derive(Clone)]
pub struct BotComponents {
    pub bot: Arc<dyn Bot>,
    pub gateway: Arc<dyn PersistenceGateway>,
    pub catalog: Arc<Catalog>,
    pub service: DialogService,
}

/// Loads the catalog from `path`, or the built-in one when no path is given.
pub fn load_catalog(path: Option<&str>) -> Result<Catalog> {
    match path {
        Some(path) => {
            let catalog = Catalog::from_file(path).map_err(|e| {
                error!(error = %e, path = %path, "Failed to load catalog");
                anyhow::anyhow!("Failed to load catalog {}: {}", path, e)
            })?;
            info!(
                path = %path,
                categories = catalog.categories.len(),
                cities = catalog.cities.len(),
                "Catalog loaded"
            );
            Ok(catalog)
        }
        None => Ok(Catalog::default()),
    }
}

pub async fn build_gateway(database_url: &str) -> Result<Arc<SqliteGateway>> {
    let gateway = SqliteGateway::new(database_url).await.map_err(|e| {
        error!(error = %e, database_url = %database_url, "Failed to initialize storage");
        anyhow::anyhow!("Failed to initialize storage: {}", e)
    })?;
    Ok(Arc::new(gateway))
}

/// Wires the dialog service over an existing transport and gateway.
#[instrument(skip(config, bot, gateway))]
pub fn build_bot_components(
    config: &BotConfig,
    bot: Arc<dyn Bot>,
    gateway: Arc<dyn PersistenceGateway>,
) -> Result<BotComponents> {
    let catalog = Arc::new(load_catalog(config.catalog_file())?);
    let service = DialogService::new(
        catalog.clone(),
        config.dialog().engine_settings(),
        bot.clone(),
        gateway.clone(),
    );
    Ok(BotComponents {
        bot,
        gateway,
        catalog,
        service,
    })
}

/// logging → user sync → dialog.
pub fn build_handler_chain(components: &BotComponents) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(LoggingHandler))
        .add_handler(Arc::new(UserSyncHandler::new(components.gateway.clone())))
        .add_handler(Arc::new(DialogHandler::new(components.service.clone())))
}
