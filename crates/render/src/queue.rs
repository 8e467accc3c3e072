use std::collections::{HashSet, VecDeque};

use dynlights_common::ChunkSectionPos;
use dynlights_core::ChunkRebuildScheduler;

/// Pending section rebuilds, deduplicated, in first-request order.
#[derive(Debug, Default)]
pub struct RebuildQueue {
    pending: VecDeque<ChunkSectionPos>,
    queued: HashSet<ChunkSectionPos>,
    requests: u64,
}

impl RebuildQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_queued(&self, section: ChunkSectionPos) -> bool {
        self.queued.contains(&section)
    }

    /// Total rebuild requests received, duplicates included.
    pub fn requests(&self) -> u64 {
        self.requests
    }

    /// Take up to `budget` sections to rebuild this frame.
    pub fn drain(&mut self, budget: usize) -> Vec<ChunkSectionPos> {
        let count = budget.min(self.pending.len());
        let batch: Vec<ChunkSectionPos> = self.pending.drain(..count).collect();
        for section in &batch {
            self.queued.remove(section);
        }
        tracing::trace!(
            rebuilt = batch.len(),
            remaining = self.pending.len(),
            "drained rebuild queue"
        );
        batch
    }
}

impl ChunkRebuildScheduler for RebuildQueue {
    fn schedule_rebuild(&mut self, section: ChunkSectionPos) {
        self.requests += 1;
        if self.queued.insert(section) {
            self.pending.push_back(section);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_are_merged() {
        let mut queue = RebuildQueue::new();
        let a = ChunkSectionPos::new(0, 4, 0);
        let b = ChunkSectionPos::new(1, 4, 0);
        queue.schedule_rebuild(a);
        queue.schedule_rebuild(b);
        queue.schedule_rebuild(a);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.requests(), 3);
        assert!(queue.is_queued(a));
    }

    #[test]
    fn drain_respects_budget_and_order() {
        let mut queue = RebuildQueue::new();
        for x in 0..5 {
            queue.schedule_rebuild(ChunkSectionPos::new(x, 0, 0));
        }
        let first = queue.drain(2);
        assert_eq!(
            first,
            vec![ChunkSectionPos::new(0, 0, 0), ChunkSectionPos::new(1, 0, 0)]
        );
        assert_eq!(queue.len(), 3);
        assert!(!queue.is_queued(ChunkSectionPos::new(0, 0, 0)));

        // A drained section can be queued again.
        queue.schedule_rebuild(ChunkSectionPos::new(0, 0, 0));
        assert_eq!(queue.len(), 4);

        assert_eq!(queue.drain(100).len(), 4);
        assert!(queue.is_empty());
    }
}
