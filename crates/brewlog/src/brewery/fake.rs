//! Fake — in-memory test doubles for the brewery collaborators.
//!
//! [`FakeBrewery`] acts as both entity cache and controller registry;
//! [`RecordingNotifier`] keeps every notification so tests can assert on it.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{
    ChartController, ControllerKind, ControllerRegistry, Entity, EntityCache, EntityKind,
    NotificationKind, Notifier,
};

/// A fake brewery for deterministic testing.
#[derive(Default)]
pub struct FakeBrewery {
    entities: Mutex<HashMap<(EntityKind, u32), Entity>>,
    controllers: Mutex<HashMap<(ControllerKind, String), Arc<dyn ChartController>>>,
}

impl FakeBrewery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an entity.
    pub fn add_entity(&self, kind: EntityKind, entity: Entity) {
        self.entities.lock().insert((kind, entity.id), entity);
    }

    /// Seed a controller.
    pub fn add_controller(&self, kind: ControllerKind, logic: &str, controller: Arc<dyn ChartController>) {
        self.controllers.lock().insert((kind, logic.to_string()), controller);
    }
}

impl EntityCache for FakeBrewery {
    fn get(&self, kind: EntityKind, id: u32) -> Option<Entity> {
        self.entities.lock().get(&(kind, id)).cloned()
    }
}

impl ControllerRegistry for FakeBrewery {
    fn controller(&self, kind: ControllerKind, logic: &str) -> Option<Arc<dyn ChartController>> {
        self.controllers.lock().get(&(kind, logic.to_string())).cloned()
    }
}

/// A notification captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub headline: String,
    pub message: String,
    pub kind: NotificationKind,
}

#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, oldest first.
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, headline: &str, message: &str, kind: NotificationKind) {
        self.sent.lock().push(Notification {
            headline: headline.to_string(),
            message: message.to_string(),
            kind,
        });
    }
}
