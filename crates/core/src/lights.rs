use dynlights_common::{EntityId, WorldId};

use crate::config::DynamicLightsConfig;
use crate::emitter::{HostWorld, LightEmitter};
use crate::invalidation::ChunkRebuildScheduler;
use crate::item::{ItemLuminance, ItemLuminanceTable};
use crate::lifecycle::WorldLoadListener;
use crate::registry::LightSourceRegistry;
use crate::resolver::{LuminanceResolver, RuleRegistry};

/// Dynamic lighting state owned by the host integration layer.
///
/// Ties configuration, registered rules, the item lookup and the source
/// registry together. The host calls [`DynamicLights::tick_entities`] from its
/// entity tick and [`DynamicLights::update_all`] once per frame.
pub struct DynamicLights {
    config: DynamicLightsConfig,
    rules: RuleRegistry,
    items: Box<dyn ItemLuminance>,
    registry: LightSourceRegistry,
}

impl DynamicLights {
    pub fn new(
        config: DynamicLightsConfig,
        rules: RuleRegistry,
        items: Box<dyn ItemLuminance>,
    ) -> Self {
        Self {
            config,
            rules,
            items,
            registry: LightSourceRegistry::new(),
        }
    }

    /// Built-in rules, with the item table seeded from defaults plus the
    /// config's `items` entries.
    pub fn from_config(config: DynamicLightsConfig) -> Self {
        let mut items = ItemLuminanceTable::with_defaults();
        items.extend_from_entries(&config.items);
        Self::new(config, RuleRegistry::with_defaults(), Box::new(items))
    }

    pub fn config(&self) -> &DynamicLightsConfig {
        &self.config
    }

    /// Swap the configuration. Turning the mode off drops every source.
    pub fn set_config(
        &mut self,
        config: DynamicLightsConfig,
        scheduler: &mut dyn ChunkRebuildScheduler,
    ) {
        tracing::debug!(mode = ?config.mode, creeper = ?config.creeper_lighting, "config changed");
        if self.config.mode.is_enabled() && !config.mode.is_enabled() {
            self.registry.remove_where(|_| true, scheduler);
        }
        self.config = config;
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    pub fn rules_mut(&mut self) -> &mut RuleRegistry {
        &mut self.rules
    }

    pub fn registry(&self) -> &LightSourceRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> LuminanceResolver<'_> {
        LuminanceResolver::new(&self.rules, self.items.as_ref(), &self.config)
    }

    /// Current luminance of an entity according to its rule.
    pub fn luminance_of(&self, entity: &dyn LightEmitter) -> u8 {
        self.resolver().luminance_of(entity)
    }

    pub fn is_enabled(&self, id: EntityId) -> bool {
        self.config.mode.is_enabled() && self.registry.contains(id)
    }

    /// Enable or disable an entity as a light source.
    ///
    /// Enabling resets any stale state first; disabling removes (and so
    /// resets) it. Enabling is refused while the mode is off.
    pub fn set_enabled(
        &mut self,
        entity: &dyn LightEmitter,
        enabled: bool,
        scheduler: &mut dyn ChunkRebuildScheduler,
    ) -> bool {
        let id = entity.id();
        if !enabled {
            return self.registry.remove(id, scheduler);
        }
        self.registry.reset(id, scheduler);
        if !self.config.mode.is_enabled() {
            return false;
        }
        self.registry.add(id, entity.world())
    }

    /// Per-entity tick hook: start tracking entities that light up and stop
    /// tracking ones that went dark or were removed.
    pub fn entity_tick(
        &mut self,
        entity: &dyn LightEmitter,
        scheduler: &mut dyn ChunkRebuildScheduler,
    ) {
        let id = entity.id();
        if entity.is_removed() {
            self.set_enabled(entity, false, scheduler);
            return;
        }
        let luminance = self.luminance_of(entity);
        let enabled = self.is_enabled(id);
        if !enabled && luminance > 0 {
            self.set_enabled(entity, true, scheduler);
        } else if enabled && luminance < 1 {
            self.set_enabled(entity, false, scheduler);
        }
    }

    /// Run [`Self::entity_tick`] for every entity and drop sources whose
    /// entity no longer exists.
    pub fn tick_entities<W: HostWorld + ?Sized>(
        &mut self,
        host: &W,
        scheduler: &mut dyn ChunkRebuildScheduler,
    ) {
        if !self.config.mode.is_enabled() {
            return;
        }
        for entity in host.emitters() {
            self.entity_tick(entity, scheduler);
        }
        let gone = self
            .registry
            .remove_where(|id| host.emitter(id).is_none(), scheduler);
        if gone > 0 {
            tracing::debug!(gone, "dropped light sources of despawned entities");
        }
    }

    /// Per-frame update; returns the number of sources that invalidated chunks.
    pub fn update_all<W: HostWorld + ?Sized>(
        &mut self,
        host: &W,
        scheduler: &mut dyn ChunkRebuildScheduler,
    ) -> usize {
        let resolver = LuminanceResolver::new(&self.rules, self.items.as_ref(), &self.config);
        self.registry.update_all(host, &resolver, scheduler)
    }
}

impl WorldLoadListener for DynamicLights {
    fn on_world_loaded(&mut self, world: WorldId) {
        self.registry.on_world_loaded(world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DynamicLightsMode, ExplosiveLightingMode, ItemLightEntry};
    use crate::emitter::testing::TestHost;
    use crate::lifecycle::WorldLifecycle;
    use dynlights_common::{ChunkSectionPos, ItemId, ItemStack};

    fn loaded(config: DynamicLightsConfig, host: &TestHost) -> DynamicLights {
        let mut lights = DynamicLights::from_config(config);
        lights.on_world_loaded(host.id);
        lights
    }

    #[test]
    fn entity_tick_enables_lit_and_disables_dark() {
        let mut host = TestHost::new();
        let mut lights = loaded(DynamicLightsConfig::default(), &host);
        let mut queue: Vec<ChunkSectionPos> = Vec::new();
        let id = host.spawn("zombie");

        lights.tick_entities(&host, &mut queue);
        assert!(!lights.is_enabled(id));

        host.entity_mut(id).held = vec![ItemStack::new("torch", 1)];
        lights.tick_entities(&host, &mut queue);
        assert!(lights.is_enabled(id));

        host.entity_mut(id).held.clear();
        lights.tick_entities(&host, &mut queue);
        assert!(!lights.is_enabled(id));
    }

    #[test]
    fn removed_and_despawned_entities_are_dropped() {
        let mut host = TestHost::new();
        let mut lights = loaded(DynamicLightsConfig::default(), &host);
        let mut queue: Vec<ChunkSectionPos> = Vec::new();
        let a = host.spawn("blaze");
        let b = host.spawn("blaze");
        lights.tick_entities(&host, &mut queue);
        assert!(lights.is_enabled(a) && lights.is_enabled(b));

        host.entity_mut(a).removed = true;
        host.entities.remove(&b);
        lights.tick_entities(&host, &mut queue);
        assert!(lights.registry().is_empty());
    }

    #[test]
    fn enabling_refused_while_off() {
        let host = {
            let mut host = TestHost::new();
            host.spawn("blaze");
            host
        };
        let config = DynamicLightsConfig {
            mode: DynamicLightsMode::Off,
            ..DynamicLightsConfig::default()
        };
        let mut lights = loaded(config, &host);
        let mut queue: Vec<ChunkSectionPos> = Vec::new();
        let blaze = host.entities.values().next().unwrap();
        assert!(!lights.set_enabled(blaze, true, &mut queue));
        assert!(!lights.is_enabled(blaze.id));
    }

    #[test]
    fn switching_mode_off_drops_sources() {
        let mut host = TestHost::new();
        let mut lights = loaded(DynamicLightsConfig::default(), &host);
        let mut queue: Vec<ChunkSectionPos> = Vec::new();
        let id = host.spawn("blaze");
        lights.tick_entities(&host, &mut queue);
        lights.update_all(&host, &mut queue);
        queue.clear();

        let off = DynamicLightsConfig {
            mode: DynamicLightsMode::Off,
            ..DynamicLightsConfig::default()
        };
        lights.set_config(off, &mut queue);
        assert!(!lights.is_enabled(id));
        assert_eq!(queue.len(), 8);
    }

    #[test]
    fn creeper_lights_up_while_igniting() {
        let mut host = TestHost::new();
        let config = DynamicLightsConfig {
            creeper_lighting: ExplosiveLightingMode::Fancy,
            ..DynamicLightsConfig::default()
        };
        let mut lights = loaded(config, &host);
        let mut queue: Vec<ChunkSectionPos> = Vec::new();
        let id = host.spawn("creeper");

        lights.tick_entities(&host, &mut queue);
        assert!(!lights.is_enabled(id));

        host.entity_mut(id).flash = 0.75;
        lights.tick_entities(&host, &mut queue);
        assert_eq!(lights.update_all(&host, &mut queue), 1);
        assert_eq!(lights.registry().state(id).unwrap().luminance(), 7);
    }

    #[test]
    fn config_items_extend_defaults() {
        let config = DynamicLightsConfig {
            items: vec![ItemLightEntry {
                item: ItemId::new("glow_ink_sac"),
                luminance: 5,
                water_sensitive: false,
            }],
            ..DynamicLightsConfig::default()
        };
        let host = TestHost::new();
        let lights = loaded(config, &host);
        let mut squid = crate::emitter::testing::TestEmitter::new("player", host.id);
        squid.held = vec![ItemStack::new("glow_ink_sac", 1)];
        assert_eq!(lights.luminance_of(&squid), 5);
        squid.held = vec![ItemStack::new("torch", 1)];
        assert_eq!(lights.luminance_of(&squid), 14);
    }

    #[test]
    fn world_transition_through_lifecycle() {
        let mut host = TestHost::new();
        let mut lifecycle = WorldLifecycle::new();
        let mut lights = DynamicLights::from_config(DynamicLightsConfig::default());
        let mut queue: Vec<ChunkSectionPos> = Vec::new();
        lifecycle.load_world(host.id, &mut [&mut lights]);

        host.spawn("blaze");
        host.spawn("magma_cube");
        lights.tick_entities(&host, &mut queue);
        assert_eq!(lights.registry().len(), 2);

        let next = TestHost::new();
        lifecycle.load_world(next.id, &mut [&mut lights]);
        assert!(lights.registry().is_empty());
        assert_eq!(lights.registry().active_world(), Some(next.id));
    }
}
