use std::borrow::Borrow;
use std::fmt;

use glam::{DVec3, IVec3};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Brightest light level a source can emit.
pub const MAX_LUMINANCE: u8 = 15;

/// Edge length of a chunk section, in blocks.
pub const SECTION_SIZE: i32 = 16;

/// Clamp a raw rule result into the valid luminance range.
///
/// Rules supplied by third parties may return anything; this is applied at
/// the point of consumption so out-of-range values never propagate.
pub fn clamp_luminance(raw: i32) -> u8 {
    raw.clamp(0, MAX_LUMINANCE as i32) as u8
}

/// Unique identifier for an entity in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

/// Identifies one loaded world instance. A fresh id is minted on every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldId(pub Uuid);

impl WorldId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WorldId {
    fn default() -> Self {
        Self::new()
    }
}

/// Entity type key used to select a luminance rule (e.g. `"creeper"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityKind(pub String);

impl EntityKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for EntityKind {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Item type key (e.g. `"torch"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub String);

impl ItemId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// A stack of items held in a hand or worn in an armor slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub item: ItemId,
    pub count: u32,
}

impl ItemStack {
    pub fn new(item: impl Into<String>, count: u32) -> Self {
        Self {
            item: ItemId::new(item),
            count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Coordinate of a 16×16×16 chunk section, the unit the renderer rebuilds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChunkSectionPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkSectionPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Section containing the given block.
    pub fn from_block(block: IVec3) -> Self {
        Self {
            x: block.x >> 4,
            y: block.y >> 4,
            z: block.z >> 4,
        }
    }

    /// Section containing the given world-space point.
    pub fn from_world(pos: DVec3) -> Self {
        Self::from_block(pos.floor().as_ivec3())
    }

    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }

    /// Minimum block corner of this section.
    pub fn min_block(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z) * SECTION_SIZE
    }
}
