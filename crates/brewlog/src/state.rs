use std::sync::Arc;
use tracing::info;

use crate::brewery::{ControllerCatalog, EntityKind, Inventory, LogNotifier};
use crate::conf::BrewlogConfig;
use crate::logs::LogService;

/// Shared application state (thread-safe)
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<BrewlogConfig>,
    pub logs: Arc<LogService>,
}

impl AppState {
    /// Build state with the config-backed brewery collaborators.
    pub fn new(config: BrewlogConfig) -> Self {
        let inventory = Inventory::from_config(&config.brewery);
        info!(
            sensors = inventory.count(EntityKind::Sensor),
            kettles = inventory.count(EntityKind::Kettle),
            fermenters = inventory.count(EntityKind::Fermenter),
            "Loaded brewery inventory"
        );

        let catalog = ControllerCatalog::with_defaults(config.brewery.controllers.as_slice());
        info!(controllers = catalog.count(), "Registered chart controllers");

        let logs = LogService::new(
            &config.logs.directory,
            config.logs.action_log.clone(),
            Arc::new(inventory),
            Arc::new(catalog),
            Arc::new(LogNotifier),
        );

        Self::with_service(config, logs)
    }

    /// Build state around an already-wired log service.
    pub fn with_service(config: BrewlogConfig, logs: LogService) -> Self {
        Self {
            config: Arc::new(config),
            logs: Arc::new(logs),
        }
    }
}
