//! Brewery — the collaborators the log service consults.
//!
//! The log endpoints never own brewery state. They look entities up through
//! [`EntityCache`], resolve chart layouts through [`ControllerRegistry`] and
//! report user-facing outcomes through [`Notifier`]. `inventory.rs`,
//! `catalog.rs` and `notify.rs` provide the config-backed implementations
//! the binary runs with; `fake.rs` provides test doubles.

pub mod catalog;
pub mod fake;
pub mod inventory;
pub mod notify;

pub use catalog::{ControllerCatalog, StandardChart};
pub use inventory::Inventory;
pub use notify::LogNotifier;

use std::fmt;
use std::sync::Arc;

/// Kinds of brewery entity held in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Sensor,
    Kettle,
    Fermenter,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Sensor => "sensor",
            EntityKind::Kettle => "kettle",
            EntityKind::Fermenter => "fermenter",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Controller registries: brewing (kettles) and fermentation (fermenters).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerKind {
    Kettle,
    Fermenter,
}

impl ControllerKind {
    /// Entity kind whose `logic` this registry resolves.
    pub fn entity_kind(&self) -> EntityKind {
        match self {
            ControllerKind::Kettle => EntityKind::Kettle,
            ControllerKind::Fermenter => EntityKind::Fermenter,
        }
    }
}

impl fmt::Display for ControllerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.entity_kind().as_str())
    }
}

/// A sensor, kettle or fermenter as seen by the log service.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub id: u32,
    pub name: String,
    /// Controller logic identifier (kettles and fermenters)
    pub logic: Option<String>,
    /// Sensor the entity reads its temperature from
    pub sensor: Option<u32>,
}

/// One chartable data stream of an entity, backed by `<data_type>_<data_id>.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartDescriptor {
    pub name: String,
    pub data_type: String,
    pub data_id: String,
}

impl ChartDescriptor {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, data_id: impl ToString) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            data_id: data_id.to_string(),
        }
    }
}

/// User-facing notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Danger,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Danger => "danger",
        }
    }
}

/// Keyed lookup of brewery entities.
pub trait EntityCache: Send + Sync {
    fn get(&self, kind: EntityKind, id: u32) -> Option<Entity>;
}

/// Describes which log series make up an entity's chart.
pub trait ChartController: Send + Sync {
    fn chart(&self, entity: &Entity) -> Vec<ChartDescriptor>;
}

/// Resolves a controller logic identifier to its chart controller.
pub trait ControllerRegistry: Send + Sync {
    fn controller(&self, kind: ControllerKind, logic: &str) -> Option<Arc<dyn ChartController>>;
}

/// Fire-and-forget side channel for user-facing messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, headline: &str, message: &str, kind: NotificationKind);
}
