//! Shared types used by every dynlights crate.

mod types;

pub use types::{
    ChunkSectionPos, EntityId, EntityKind, ItemId, ItemStack, MAX_LUMINANCE, SECTION_SIZE,
    WorldId, clamp_luminance,
};
