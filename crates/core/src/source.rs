use std::collections::HashSet;

use dynlights_common::ChunkSectionPos;
use glam::DVec3;

use crate::invalidation::{ChunkRebuildScheduler, lit_sections};

/// Movement of the emission point on any axis beyond this counts as a change.
pub const MOVE_THRESHOLD: f64 = 0.1;

/// What the registry remembers about one tracked light source between ticks.
#[derive(Debug, Clone, Default)]
pub struct LightSourceState {
    last_emission: Option<DVec3>,
    last_luminance: u8,
    tracked: HashSet<ChunkSectionPos>,
    last_update_tick: Option<u64>,
}

impl LightSourceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Luminance as of the last invalidation.
    pub fn luminance(&self) -> u8 {
        self.last_luminance
    }

    /// Emission point as of the last invalidation.
    pub fn emission(&self) -> Option<DVec3> {
        self.last_emission
    }

    /// Sections currently lit by this source.
    pub fn tracked_sections(&self) -> &HashSet<ChunkSectionPos> {
        &self.tracked
    }

    /// Claim this tick's update slot. At most one claim succeeds per
    /// `interval_ticks` window, and never two within the same tick.
    pub fn should_update(&mut self, tick: u64, interval_ticks: u64) -> bool {
        if let Some(last) = self.last_update_tick {
            if tick < last.saturating_add(interval_ticks.max(1)) {
                return false;
            }
        }
        self.last_update_tick = Some(tick);
        true
    }

    fn has_changed(&self, emission: DVec3, luminance: u8) -> bool {
        if luminance != self.last_luminance {
            return true;
        }
        match self.last_emission {
            Some(last) => (emission - last).abs().max_element() > MOVE_THRESHOLD,
            None => true,
        }
    }

    /// Rebuild the chunks affected by a change of luminance or emission point.
    ///
    /// `emission` is where the light comes from (the entity's eye); falloff
    /// and lit sections are both measured from it. Returns false, scheduling
    /// nothing, when neither changed.
    pub fn update(
        &mut self,
        emission: DVec3,
        luminance: u8,
        scheduler: &mut dyn ChunkRebuildScheduler,
    ) -> bool {
        if !self.has_changed(emission, luminance) {
            return false;
        }
        self.last_emission = Some(emission);
        self.last_luminance = luminance;

        let mut lit = HashSet::new();
        if luminance > 0 {
            for section in lit_sections(emission) {
                scheduler.schedule_rebuild(section);
                self.tracked.remove(&section);
                lit.insert(section);
            }
        }
        // Whatever is left lost its light.
        for section in self.tracked.drain() {
            scheduler.schedule_rebuild(section);
        }
        self.tracked = lit;
        tracing::trace!(
            luminance,
            sections = self.tracked.len(),
            "dynamic light invalidated"
        );
        true
    }

    /// Force the last lit sections to rebuild and forget the last luminance.
    pub fn reset(&mut self, scheduler: &mut dyn ChunkRebuildScheduler) {
        for section in self.tracked.drain() {
            scheduler.schedule_rebuild(section);
        }
        self.last_luminance = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_update_lights_eight_sections() {
        let mut state = LightSourceState::new();
        let mut queue = Vec::new();
        assert!(state.update(DVec3::new(4.0, 65.6, 4.0), 12, &mut queue));
        assert_eq!(queue.len(), 8);
        assert_eq!(state.tracked_sections().len(), 8);
        assert_eq!(state.luminance(), 12);
    }

    #[test]
    fn unchanged_source_schedules_nothing() {
        let mut state = LightSourceState::new();
        let mut queue = Vec::new();
        let pos = DVec3::new(4.0, 65.6, 4.0);
        state.update(pos, 12, &mut queue);
        queue.clear();

        assert!(!state.update(pos + DVec3::splat(0.05), 12, &mut queue));
        assert!(queue.is_empty());
    }

    #[test]
    fn luminance_change_alone_triggers() {
        let mut state = LightSourceState::new();
        let mut queue = Vec::new();
        let pos = DVec3::new(4.0, 64.0, 4.0);
        state.update(pos, 12, &mut queue);
        assert!(state.update(pos, 7, &mut queue));
        assert_eq!(state.luminance(), 7);
    }

    #[test]
    fn moving_away_rebuilds_abandoned_sections() {
        let mut state = LightSourceState::new();
        let mut queue = Vec::new();
        state.update(DVec3::new(4.0, 64.0, 4.0), 12, &mut queue);
        let before = state.tracked_sections().clone();
        queue.clear();

        state.update(DVec3::new(100.0, 64.0, 100.0), 12, &mut queue);
        // eight new sections plus the eight abandoned ones
        assert_eq!(queue.len(), 16);
        for section in before {
            assert!(queue.contains(&section));
            assert!(!state.tracked_sections().contains(&section));
        }
    }

    #[test]
    fn going_dark_rebuilds_tracked_and_tracks_nothing() {
        let mut state = LightSourceState::new();
        let mut queue = Vec::new();
        let pos = DVec3::new(4.0, 64.0, 4.0);
        state.update(pos, 12, &mut queue);
        queue.clear();

        assert!(state.update(pos, 0, &mut queue));
        assert_eq!(queue.len(), 8);
        assert!(state.tracked_sections().is_empty());
    }

    #[test]
    fn reset_rebuilds_without_delta() {
        let mut state = LightSourceState::new();
        let mut queue = Vec::new();
        state.update(DVec3::new(4.0, 64.0, 4.0), 12, &mut queue);
        queue.clear();

        state.reset(&mut queue);
        assert_eq!(queue.len(), 8);
        assert_eq!(state.luminance(), 0);
        assert!(state.tracked_sections().is_empty());
    }

    #[test]
    fn should_update_once_per_interval() {
        let mut state = LightSourceState::new();
        assert!(state.should_update(10, 1));
        assert!(!state.should_update(10, 1));
        assert!(state.should_update(11, 1));

        assert!(!state.should_update(15, 5));
        assert!(state.should_update(16, 5));
    }
}
