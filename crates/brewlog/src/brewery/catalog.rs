//! Catalog — controller registry for kettle and fermenter chart layouts.

use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use super::{ChartController, ChartDescriptor, ControllerKind, ControllerRegistry, Entity};

/// Default chart layout: the entity's sensor temperature plus its own
/// target temperature series.
#[derive(Debug, Clone, Copy)]
pub struct StandardChart {
    kind: ControllerKind,
}

impl StandardChart {
    pub fn new(kind: ControllerKind) -> Self {
        Self { kind }
    }
}

impl ChartController for StandardChart {
    fn chart(&self, entity: &Entity) -> Vec<ChartDescriptor> {
        let mut result = Vec::with_capacity(2);
        if let Some(sensor) = entity.sensor {
            result.push(ChartDescriptor::new("Temp", "sensor", sensor));
        }
        result.push(ChartDescriptor::new(
            "Target Temp",
            self.kind.entity_kind().as_str(),
            entity.id,
        ));
        result
    }
}

/// Concurrent map of `(kind, logic)` → controller.
#[derive(Default)]
pub struct ControllerCatalog {
    controllers: DashMap<(ControllerKind, String), Arc<dyn ChartController>>,
}

impl ControllerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register [`StandardChart`] under each logic name for both registries.
    pub fn with_defaults<S: AsRef<str>>(logic_names: &[S]) -> Self {
        let catalog = Self::new();
        for name in logic_names {
            for kind in [ControllerKind::Kettle, ControllerKind::Fermenter] {
                catalog.register(kind, name.as_ref(), Arc::new(StandardChart::new(kind)));
            }
        }
        catalog
    }

    /// Add or replace a controller.
    pub fn register(&self, kind: ControllerKind, logic: &str, controller: Arc<dyn ChartController>) {
        debug!(kind = %kind, logic = logic, "Registered chart controller");
        self.controllers.insert((kind, logic.to_string()), controller);
    }

    pub fn count(&self) -> usize {
        self.controllers.len()
    }
}

impl ControllerRegistry for ControllerCatalog {
    fn controller(&self, kind: ControllerKind, logic: &str) -> Option<Arc<dyn ChartController>> {
        self.controllers
            .get(&(kind, logic.to_string()))
            .map(|entry| Arc::clone(entry.value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kettle(sensor: Option<u32>) -> Entity {
        Entity {
            id: 4,
            name: "Boil Kettle".to_string(),
            logic: Some("Hysteresis".to_string()),
            sensor,
        }
    }

    #[test]
    fn test_standard_kettle_chart() {
        let chart = StandardChart::new(ControllerKind::Kettle).chart(&kettle(Some(2)));
        assert_eq!(
            chart,
            vec![
                ChartDescriptor::new("Temp", "sensor", 2),
                ChartDescriptor::new("Target Temp", "kettle", 4),
            ]
        );
    }

    #[test]
    fn test_standard_fermenter_chart_without_sensor() {
        let chart = StandardChart::new(ControllerKind::Fermenter).chart(&kettle(None));
        assert_eq!(chart, vec![ChartDescriptor::new("Target Temp", "fermenter", 4)]);
    }

    #[test]
    fn test_defaults_register_both_kinds() {
        let catalog = ControllerCatalog::with_defaults(&["Hysteresis"]);
        assert_eq!(catalog.count(), 2);
        assert!(catalog.controller(ControllerKind::Kettle, "Hysteresis").is_some());
        assert!(catalog.controller(ControllerKind::Fermenter, "Hysteresis").is_some());
        assert!(catalog.controller(ControllerKind::Kettle, "PID").is_none());
    }

    #[test]
    fn test_register_replaces_existing() {
        struct Single;
        impl ChartController for Single {
            fn chart(&self, entity: &Entity) -> Vec<ChartDescriptor> {
                vec![ChartDescriptor::new("Power", "kettle_power", entity.id)]
            }
        }

        let catalog = ControllerCatalog::with_defaults(&["Hysteresis"]);
        catalog.register(ControllerKind::Kettle, "Hysteresis", Arc::new(Single));

        let controller = catalog.controller(ControllerKind::Kettle, "Hysteresis").unwrap();
        let chart = controller.chart(&kettle(Some(1)));
        assert_eq!(chart, vec![ChartDescriptor::new("Power", "kettle_power", 4)]);
        assert_eq!(catalog.count(), 2);
    }
}
