use dynlights_common::{ChunkSectionPos, SECTION_SIZE};
use glam::DVec3;

/// Host renderer capability: queue a chunk section for mesh rebuild.
///
/// Fire-and-forget; the renderer owns scheduling and deduplication.
pub trait ChunkRebuildScheduler {
    fn schedule_rebuild(&mut self, section: ChunkSectionPos);
}

impl ChunkRebuildScheduler for Vec<ChunkSectionPos> {
    fn schedule_rebuild(&mut self, section: ChunkSectionPos) {
        self.push(section);
    }
}

/// The 2×2×2 block of sections a light emitted at `emission` can reach.
///
/// Starts at the section holding the emission point and extends toward
/// whichever neighbour is nearer on each axis. A light never reaches further
/// than half a section, so these eight sections cover its whole radius.
pub fn lit_sections(emission: DVec3) -> [ChunkSectionPos; 8] {
    let block = emission.floor().as_ivec3();
    let start = ChunkSectionPos::from_block(block);
    let toward = |coord: i32| {
        if coord.rem_euclid(SECTION_SIZE) >= SECTION_SIZE / 2 {
            1
        } else {
            -1
        }
    };
    let (dx, dy, dz) = (toward(block.x), toward(block.y), toward(block.z));

    [
        start,
        start.offset(dx, 0, 0),
        start.offset(dx, 0, dz),
        start.offset(0, 0, dz),
        start.offset(0, dy, 0),
        start.offset(dx, dy, 0),
        start.offset(dx, dy, dz),
        start.offset(0, dy, dz),
    ]
}
