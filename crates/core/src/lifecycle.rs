use dynlights_common::WorldId;

/// Notified when a new world becomes active, before any of its entities tick.
pub trait WorldLoadListener {
    fn on_world_loaded(&mut self, world: WorldId);
}

/// Tracks the active world and announces transitions to listeners.
#[derive(Debug, Default)]
pub struct WorldLifecycle {
    active: Option<WorldId>,
    transitions: u64,
}

impl WorldLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Option<WorldId> {
        self.active
    }

    /// Number of worlds loaded so far.
    pub fn transitions(&self) -> u64 {
        self.transitions
    }

    /// Make `world` active and notify every listener.
    pub fn load_world(&mut self, world: WorldId, listeners: &mut [&mut dyn WorldLoadListener]) {
        tracing::debug!(
            ?world,
            previous = ?self.active,
            listeners = listeners.len(),
            "world loaded"
        );
        self.active = Some(world);
        self.transitions += 1;
        for listener in listeners.iter_mut() {
            listener.on_world_loaded(world);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::LightSourceRegistry;
    use dynlights_common::EntityId;

    #[derive(Default)]
    struct Recorder(Vec<WorldId>);

    impl WorldLoadListener for Recorder {
        fn on_world_loaded(&mut self, world: WorldId) {
            self.0.push(world);
        }
    }

    #[test]
    fn notifies_every_listener() {
        let mut lifecycle = WorldLifecycle::new();
        let mut a = Recorder::default();
        let mut b = Recorder::default();
        let world = WorldId::new();
        lifecycle.load_world(world, &mut [&mut a, &mut b]);
        assert_eq!(a.0, vec![world]);
        assert_eq!(b.0, vec![world]);
        assert_eq!(lifecycle.active(), Some(world));
        assert_eq!(lifecycle.transitions(), 1);
    }

    #[test]
    fn world_load_always_empties_registry() {
        let mut lifecycle = WorldLifecycle::new();
        let first = WorldId::new();
        let mut registry = LightSourceRegistry::new();
        lifecycle.load_world(first, &mut [&mut registry]);

        for size in [0, 1, 25] {
            for _ in 0..size {
                registry.add(EntityId::new(), lifecycle.active().unwrap());
            }
            assert_eq!(registry.len(), size);
            lifecycle.load_world(WorldId::new(), &mut [&mut registry]);
            assert!(registry.is_empty());
        }
    }
}
