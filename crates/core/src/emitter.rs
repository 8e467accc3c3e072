use dynlights_common::{EntityId, EntityKind, ItemStack, WorldId};
use glam::DVec3;

/// Read-only view of a host entity that may emit dynamic light.
///
/// Everything here is resident entity state; implementations must not block.
pub trait LightEmitter {
    fn id(&self) -> EntityId;

    /// Type key used to look up the entity's luminance rule.
    fn kind(&self) -> &EntityKind;

    fn world(&self) -> WorldId;

    fn position(&self) -> DVec3;

    /// Point light is emitted from. Chunk section Y is taken from here.
    fn eye_position(&self) -> DVec3 {
        self.position()
    }

    /// Whether the eye position is inside a fluid.
    fn is_eye_submerged(&self) -> bool {
        false
    }

    fn held_items(&self) -> &[ItemStack] {
        &[]
    }

    fn worn_items(&self) -> &[ItemStack] {
        &[]
    }

    /// Creeper ignition progress in `[0, 1]`; zero for everything else.
    fn flash_intensity(&self) -> f32 {
        0.0
    }

    fn is_on_fire(&self) -> bool {
        false
    }

    fn is_removed(&self) -> bool {
        false
    }

    /// The entity controlled by this client.
    fn is_local_player(&self) -> bool {
        false
    }
}

/// The loaded world as seen by the light registry.
pub trait HostWorld {
    fn id(&self) -> WorldId;

    /// Current game tick.
    fn tick(&self) -> u64;

    fn emitter(&self, id: EntityId) -> Option<&dyn LightEmitter>;

    fn emitters(&self) -> Box<dyn Iterator<Item = &dyn LightEmitter> + '_>;
}
