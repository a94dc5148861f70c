//! Inventory — config-backed entity cache.

use std::collections::HashMap;

use super::{Entity, EntityCache, EntityKind};
use crate::conf::{BreweryConfig, EntityConfig};

/// Read-only entity cache built once from the `[brewery]` config section.
#[derive(Debug, Default)]
pub struct Inventory {
    entities: HashMap<(EntityKind, u32), Entity>,
}

impl Inventory {
    pub fn from_config(config: &BreweryConfig) -> Self {
        let mut inventory = Self::default();
        let sections = [
            (EntityKind::Sensor, &config.sensors),
            (EntityKind::Kettle, &config.kettles),
            (EntityKind::Fermenter, &config.fermenters),
        ];
        for (kind, entities) in sections {
            for entity in entities {
                inventory.insert(kind, entity);
            }
        }
        inventory
    }

    fn insert(&mut self, kind: EntityKind, config: &EntityConfig) {
        let entity = Entity {
            id: config.id,
            name: config.name.clone(),
            logic: config.logic.clone(),
            sensor: config.sensor,
        };
        self.entities.insert((kind, config.id), entity);
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.entities.keys().filter(|(k, _)| *k == kind).count()
    }
}

impl EntityCache for Inventory {
    fn get(&self, kind: EntityKind, id: u32) -> Option<Entity> {
        self.entities.get(&(kind, id)).cloned()
    }
}
