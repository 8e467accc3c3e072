use std::collections::HashMap;

use dynlights_common::{EntityId, MAX_LUMINANCE, WorldId};
use glam::{DVec3, IVec3};

use crate::emitter::HostWorld;
use crate::invalidation::ChunkRebuildScheduler;
use crate::lifecycle::WorldLoadListener;
use crate::resolver::LuminanceResolver;
use crate::source::LightSourceState;

/// Furthest a dynamic light reaches, in blocks.
pub const MAX_LIGHT_RADIUS: f64 = 7.75;

const MAX_LIGHT_RADIUS_SQUARED: f64 = MAX_LIGHT_RADIUS * MAX_LIGHT_RADIUS;

/// Running counters for instrumentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistryStats {
    pub adds: u64,
    pub removes: u64,
    pub resets: u64,
    pub clears: u64,
    pub invalidations: u64,
}

/// Light sources tracked in the active world.
///
/// A handle is present iff its source is enabled and neither it was removed
/// nor the world cleared since. Only sources in the active world are accepted.
#[derive(Debug, Default)]
pub struct LightSourceRegistry {
    world: Option<WorldId>,
    sources: HashMap<EntityId, LightSourceState>,
    stats: RegistryStats,
}

impl LightSourceRegistry {
    /// Registry with no active world; nothing is trackable until one loads.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_world(world: WorldId) -> Self {
        Self {
            world: Some(world),
            ..Self::default()
        }
    }

    pub fn active_world(&self) -> Option<WorldId> {
        self.world
    }

    pub fn stats(&self) -> RegistryStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.sources.contains_key(&id)
    }

    pub fn state(&self, id: EntityId) -> Option<&LightSourceState> {
        self.sources.get(&id)
    }

    /// Start tracking a source. Returns false if it was already tracked or
    /// belongs to a world other than the active one.
    pub fn add(&mut self, id: EntityId, world: WorldId) -> bool {
        if self.world != Some(world) {
            tracing::trace!(?id, ?world, "light source outside active world ignored");
            return false;
        }
        if self.sources.contains_key(&id) {
            return false;
        }
        self.sources.insert(id, LightSourceState::new());
        self.stats.adds += 1;
        tracing::debug!(?id, total = self.sources.len(), "light source added");
        true
    }

    /// Stop tracking a source, rebuilding the sections it lit.
    pub fn remove(&mut self, id: EntityId, scheduler: &mut dyn ChunkRebuildScheduler) -> bool {
        let Some(mut state) = self.sources.remove(&id) else {
            return false;
        };
        state.reset(scheduler);
        self.stats.resets += 1;
        self.stats.removes += 1;
        tracing::debug!(?id, total = self.sources.len(), "light source removed");
        true
    }

    /// Reset a tracked source in place. No-op for untracked handles.
    pub fn reset(&mut self, id: EntityId, scheduler: &mut dyn ChunkRebuildScheduler) -> bool {
        let Some(state) = self.sources.get_mut(&id) else {
            return false;
        };
        state.reset(scheduler);
        self.stats.resets += 1;
        true
    }

    /// Remove every source matching `predicate`, resetting each.
    pub fn remove_where(
        &mut self,
        mut predicate: impl FnMut(EntityId) -> bool,
        scheduler: &mut dyn ChunkRebuildScheduler,
    ) -> usize {
        let doomed: Vec<EntityId> = self
            .sources
            .keys()
            .copied()
            .filter(|id| predicate(*id))
            .collect();
        for id in &doomed {
            self.remove(*id, scheduler);
        }
        doomed.len()
    }

    /// Drop every source without per-source resets.
    ///
    /// Used on world teardown, where the host discards chunk meshes anyway.
    pub fn clear(&mut self) {
        let dropped = self.sources.len();
        self.sources.clear();
        self.stats.clears += 1;
        tracing::debug!(dropped, "light sources cleared");
    }

    /// Per-tick update of every tracked source.
    ///
    /// Returns the number of sources whose chunks were invalidated.
    pub fn update_all<W: HostWorld + ?Sized>(
        &mut self,
        host: &W,
        resolver: &LuminanceResolver<'_>,
        scheduler: &mut dyn ChunkRebuildScheduler,
    ) -> usize {
        let mode = resolver.config.mode;
        if !mode.is_enabled() {
            return 0;
        }
        let world = host.id();
        if self.world != Some(world) {
            return 0;
        }
        let _span = tracing::info_span!("dynamic_lights_update").entered();

        let tick = host.tick();
        let interval = mode.update_interval_ticks();
        let mut updated = 0;
        for (id, state) in self.sources.iter_mut() {
            let Some(entity) = host.emitter(*id) else {
                continue;
            };
            if entity.world() != world || !state.should_update(tick, interval) {
                continue;
            }
            let luminance = resolver.luminance_of(entity);
            if state.update(entity.eye_position(), luminance, scheduler) {
                updated += 1;
            }
        }
        self.stats.invalidations += updated as u64;

        tracing::trace!(
            tick,
            updated,
            total = self.sources.len(),
            "dynamic lights update complete"
        );
        updated
    }

    /// Dynamic light reaching the centre of `block`, before rounding.
    ///
    /// Measured from each source's emission point, the same point its lit
    /// sections were chosen from. Falls off linearly from the source's luminance to zero at
    /// [`MAX_LIGHT_RADIUS`]; the brightest source wins.
    pub fn dynamic_light_level(&self, block: IVec3) -> f64 {
        let centre = block.as_dvec3() + DVec3::splat(0.5);
        self.sources
            .values()
            .filter(|state| state.luminance() > 0)
            .filter_map(|state| {
                let emission = state.emission()?;
                let distance_squared = centre.distance_squared(emission);
                if distance_squared > MAX_LIGHT_RADIUS_SQUARED {
                    return None;
                }
                let falloff = 1.0 - distance_squared.sqrt() / MAX_LIGHT_RADIUS;
                Some(falloff * state.luminance() as f64)
            })
            .fold(0.0, f64::max)
    }

    /// Block light at `block` with dynamic light folded in.
    pub fn block_light_with_dynamic(&self, block: IVec3, base: u8) -> u8 {
        let dynamic = self.dynamic_light_level(block).ceil() as u8;
        base.max(dynamic).min(MAX_LUMINANCE)
    }
}

impl WorldLoadListener for LightSourceRegistry {
    fn on_world_loaded(&mut self, world: WorldId) {
        self.clear();
        self.world = Some(world);
    }
}
