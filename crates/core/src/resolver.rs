use std::collections::HashMap;

use dynlights_common::{EntityKind, MAX_LUMINANCE, clamp_luminance};

use crate::config::DynamicLightsConfig;
use crate::emitter::LightEmitter;
use crate::item::ItemLuminance;
use crate::rule::{LuminanceRule, RuleContext};

/// Luminance rules registered per entity type.
///
/// Entity types without a rule never emit dynamic light.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: HashMap<EntityKind, LuminanceRule>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in rules for common entity types.
    pub fn with_defaults() -> Self {
        let mut rules = Self::new();
        rules.register(EntityKind::new("player"), LuminanceRule::equipment_only());
        rules.register(EntityKind::new("zombie"), LuminanceRule::equipment_only());
        rules.register(EntityKind::new("skeleton"), LuminanceRule::equipment_only());
        rules.register(EntityKind::new("creeper"), LuminanceRule::creeper(None));
        rules.register(EntityKind::new("blaze"), LuminanceRule::constant(10));
        rules.register(EntityKind::new("magma_cube"), LuminanceRule::constant(8));
        rules.register(
            EntityKind::new("glow_squid"),
            LuminanceRule::new(|_| 6, |_| false),
        );
        rules
    }

    /// Register or replace the rule for an entity type.
    pub fn register(&mut self, kind: EntityKind, rule: LuminanceRule) {
        tracing::debug!(%kind, ?rule, "registered luminance rule");
        self.rules.insert(kind, rule);
    }

    pub fn unregister(&mut self, kind: &str) -> Option<LuminanceRule> {
        self.rules.remove(kind)
    }

    pub fn get(&self, kind: &str) -> Option<&LuminanceRule> {
        self.rules.get(kind)
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.rules.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Everything needed to turn an entity into a luminance value.
#[derive(Clone, Copy)]
pub struct LuminanceResolver<'a> {
    pub rules: &'a RuleRegistry,
    pub items: &'a dyn ItemLuminance,
    pub config: &'a DynamicLightsConfig,
}

impl<'a> LuminanceResolver<'a> {
    pub fn new(
        rules: &'a RuleRegistry,
        items: &'a dyn ItemLuminance,
        config: &'a DynamicLightsConfig,
    ) -> Self {
        Self {
            rules,
            items,
            config,
        }
    }

    /// Effective luminance of an entity, `0..=15`.
    pub fn luminance_of(&self, entity: &dyn LightEmitter) -> u8 {
        let Some(rule) = self.rules.get(entity.kind().as_str()) else {
            return 0;
        };
        let allowed = if entity.is_local_player() {
            self.config.self_light_source
        } else {
            self.config.entities_light_source
        };
        if !allowed {
            return 0;
        }
        if self.config.water_sensitive_check
            && entity.is_eye_submerged()
            && rule.is_water_sensitive(entity)
        {
            return 0;
        }

        let ctx = RuleContext {
            config: self.config,
            items: self.items,
        };
        let luminance = clamp_luminance(rule.luminance(entity, &ctx));
        if entity.is_on_fire() {
            MAX_LUMINANCE
        } else {
            luminance
        }
    }
}
