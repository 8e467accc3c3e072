use dynlights_core::{ChunkRebuildScheduler, DynamicLights, WorldLifecycle};

use crate::world::World;

/// Host integration layer: owns the loaded world and the dynamic light state.
///
/// World transitions go through [`WorldLifecycle`], so the light registry is
/// emptied before the new world's first tick.
pub struct Client {
    world: Option<World>,
    lifecycle: WorldLifecycle,
    lights: DynamicLights,
}

impl Client {
    pub fn new(lights: DynamicLights) -> Self {
        Self {
            world: None,
            lifecycle: WorldLifecycle::new(),
            lights,
        }
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    pub fn lights(&self) -> &DynamicLights {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut DynamicLights {
        &mut self.lights
    }

    pub fn lifecycle(&self) -> &WorldLifecycle {
        &self.lifecycle
    }

    /// Replace the loaded world, returning the previous one.
    pub fn load_world(&mut self, world: World) -> Option<World> {
        self.lifecycle.load_world(world.id(), &mut [&mut self.lights]);
        self.world.replace(world)
    }

    /// Advance the world one tick and run the per-entity light hook.
    /// No-op while no world is loaded.
    pub fn tick(&mut self, scheduler: &mut dyn ChunkRebuildScheduler) {
        let Some(world) = self.world.as_mut() else {
            return;
        };
        world.step();
        self.lights.tick_entities(&*world, scheduler);
    }

    /// Per-frame light update. Returns the number of sources that invalidated chunks.
    pub fn render_frame(&mut self, scheduler: &mut dyn ChunkRebuildScheduler) -> usize {
        match self.world.as_ref() {
            Some(world) => self.lights.update_all(world, scheduler),
            None => 0,
        }
    }
}
