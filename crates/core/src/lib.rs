//! Dynamic lights: tracks moving light sources and tells the renderer which
//! chunk sections to rebuild.
//!
//! # Invariants
//! - A source is in the registry iff it is enabled in the active world.
//! - Luminance is always clamped to `0..=15` before it is stored or used.
//! - Each source invalidates chunks at most once per tick, and only when its
//!   luminance or position changed.
//! - Loading a world empties the registry before the new world's entities tick.

pub mod config;
pub mod emitter;
pub mod equipment;
pub mod invalidation;
pub mod item;
pub mod lifecycle;
pub mod lights;
pub mod registry;
pub mod resolver;
pub mod rule;
pub mod source;

pub use config::{
    ConfigError, DynamicLightsConfig, DynamicLightsMode, ExplosiveLightingMode, ItemLightEntry,
};
pub use emitter::{HostWorld, LightEmitter};
pub use equipment::equipment_luminance;
pub use invalidation::{ChunkRebuildScheduler, lit_sections};
pub use item::{ItemLuminance, ItemLuminanceTable};
pub use lifecycle::{WorldLifecycle, WorldLoadListener};
pub use lights::DynamicLights;
pub use registry::{LightSourceRegistry, MAX_LIGHT_RADIUS, RegistryStats};
pub use resolver::{LuminanceResolver, RuleRegistry};
pub use rule::{LuminanceRule, RuleContext};
pub use source::LightSourceState;

pub fn crate_info() -> &'static str {
    "dynlights-core v0.1.0"
}
