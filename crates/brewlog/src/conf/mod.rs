//! Conf — service configuration model and loading.

pub mod load;
pub mod model;

pub use model::{
    BreweryConfig, BrewlogConfig, EntityConfig, LogFormat, LogOutput, LoggingConfig, LogsConfig,
    ServerConfig,
};
