//! Per-entity-type luminance rules.
//!
//! Rules are plain values composed by wrapping: the living rule layers an
//! equipment scan over an inner rule, the creeper rule layers its ignition
//! glow over an optional inner rule. Evaluation never allocates.

use std::fmt;
use std::sync::Arc;

use crate::config::{DynamicLightsConfig, ExplosiveLightingMode};
use crate::emitter::LightEmitter;
use crate::equipment::equipment_luminance;
use crate::item::ItemLuminance;

/// Flash intensities at or below this are treated as "not igniting".
pub const FLASH_EPSILON: f32 = 0.001;

/// Luminance of an igniting creeper in simple mode, and at full flash in fancy mode.
pub const CREEPER_LUMINANCE: i32 = 10;

pub type LuminanceFn = Arc<dyn Fn(&dyn LightEmitter) -> i32 + Send + Sync>;
pub type WaterSensitiveFn = Arc<dyn Fn(&dyn LightEmitter) -> bool + Send + Sync>;

/// Collaborators a rule may consult while evaluating.
#[derive(Clone, Copy)]
pub struct RuleContext<'a> {
    pub config: &'a DynamicLightsConfig,
    pub items: &'a dyn ItemLuminance,
}

/// Computes the light an entity emits.
#[derive(Clone)]
pub enum LuminanceRule {
    /// Two independent functions supplied by a registrant.
    Static {
        luminance: LuminanceFn,
        water_sensitive: WaterSensitiveFn,
    },
    /// `max(inner, equipment)`.
    Living(Box<LuminanceRule>),
    /// Ignition glow, `max`'d with the optional inner rule. Always water-sensitive.
    Creeper(Option<Box<LuminanceRule>>),
}

impl LuminanceRule {
    pub fn new(
        luminance: impl Fn(&dyn LightEmitter) -> i32 + Send + Sync + 'static,
        water_sensitive: impl Fn(&dyn LightEmitter) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::Static {
            luminance: Arc::new(luminance),
            water_sensitive: Arc::new(water_sensitive),
        }
    }

    /// Static rule that is never water-sensitive.
    pub fn from_fn(luminance: impl Fn(&dyn LightEmitter) -> i32 + Send + Sync + 'static) -> Self {
        Self::new(luminance, |_| false)
    }

    pub fn constant(luminance: i32) -> Self {
        Self::from_fn(move |_| luminance)
    }

    pub fn living(inner: LuminanceRule) -> Self {
        Self::Living(Box::new(inner))
    }

    /// Living rule whose only light comes from equipment.
    pub fn equipment_only() -> Self {
        Self::living(Self::constant(0))
    }

    pub fn creeper(inner: Option<LuminanceRule>) -> Self {
        Self::Creeper(inner.map(Box::new))
    }

    /// Raw luminance; callers clamp to `0..=15`.
    pub fn luminance(&self, entity: &dyn LightEmitter, ctx: &RuleContext<'_>) -> i32 {
        match self {
            Self::Static { luminance, .. } => luminance(entity),
            Self::Living(inner) => {
                let submerged = entity.is_eye_submerged();
                let equipment = equipment_luminance(entity, ctx.items, submerged) as i32;
                equipment.max(inner.luminance(entity, ctx))
            }
            Self::Creeper(inner) => {
                let glow = creeper_glow(entity.flash_intensity(), ctx.config.creeper_lighting);
                match inner {
                    Some(inner) => glow.max(inner.luminance(entity, ctx)),
                    None => glow,
                }
            }
        }
    }

    pub fn is_water_sensitive(&self, entity: &dyn LightEmitter) -> bool {
        match self {
            Self::Static {
                water_sensitive, ..
            } => water_sensitive(entity),
            // Submersion is applied per item by the equipment scan.
            Self::Living(_) => false,
            Self::Creeper(_) => true,
        }
    }
}

fn creeper_glow(intensity: f32, mode: ExplosiveLightingMode) -> i32 {
    if intensity <= FLASH_EPSILON {
        return 0;
    }
    match mode {
        ExplosiveLightingMode::Off => 0,
        ExplosiveLightingMode::Simple => CREEPER_LUMINANCE,
        ExplosiveLightingMode::Fancy => (intensity * CREEPER_LUMINANCE as f32) as i32,
    }
}

impl fmt::Debug for LuminanceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static { .. } => f.write_str("Static"),
            Self::Living(inner) => f.debug_tuple("Living").field(inner).finish(),
            Self::Creeper(inner) => f.debug_tuple("Creeper").field(inner).finish(),
        }
    }
}
