use std::collections::BTreeMap;

use dynlights_common::{EntityId, EntityKind, ItemStack, WorldId};
use dynlights_core::{HostWorld, LightEmitter};
use glam::DVec3;

/// Eye height used when none is given.
pub const DEFAULT_EYE_HEIGHT: f64 = 1.62;

/// A simulated entity with everything the light rules read.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub world: WorldId,
    pub position: DVec3,
    pub eye_height: f64,
    pub eye_submerged: bool,
    pub held: Vec<ItemStack>,
    pub worn: Vec<ItemStack>,
    pub flash_intensity: f32,
    pub on_fire: bool,
    pub removed: bool,
    pub local_player: bool,
}

impl Entity {
    pub fn new(kind: &str, position: DVec3) -> Self {
        Self {
            id: EntityId::new(),
            kind: EntityKind::new(kind),
            world: WorldId::default(),
            position,
            eye_height: DEFAULT_EYE_HEIGHT,
            eye_submerged: false,
            held: Vec::new(),
            worn: Vec::new(),
            flash_intensity: 0.0,
            on_fire: false,
            removed: false,
            local_player: false,
        }
    }

    pub fn holding(mut self, item: &str) -> Self {
        self.held.push(ItemStack::new(item, 1));
        self
    }

    pub fn wearing(mut self, item: &str) -> Self {
        self.worn.push(ItemStack::new(item, 1));
        self
    }

    pub fn as_local_player(mut self) -> Self {
        self.local_player = true;
        self
    }
}

impl LightEmitter for Entity {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> &EntityKind {
        &self.kind
    }

    fn world(&self) -> WorldId {
        self.world
    }

    fn position(&self) -> DVec3 {
        self.position
    }

    fn eye_position(&self) -> DVec3 {
        self.position + DVec3::Y * self.eye_height
    }

    fn is_eye_submerged(&self) -> bool {
        self.eye_submerged
    }

    fn held_items(&self) -> &[ItemStack] {
        &self.held
    }

    fn worn_items(&self) -> &[ItemStack] {
        &self.worn
    }

    fn flash_intensity(&self) -> f32 {
        self.flash_intensity
    }

    fn is_on_fire(&self) -> bool {
        self.on_fire
    }

    fn is_removed(&self) -> bool {
        self.removed
    }

    fn is_local_player(&self) -> bool {
        self.local_player
    }
}

/// A loaded world instance.
///
/// Uses BTreeMap so entity iteration order is stable across runs.
#[derive(Debug, Clone, Default)]
pub struct World {
    id: WorldId,
    tick: u64,
    entities: BTreeMap<EntityId, Entity>,
}

impl World {
    /// Create an empty world with a fresh id at tick 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> WorldId {
        self.id
    }

    /// Current simulation tick.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Number of entities in the world.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn entities(&self) -> &BTreeMap<EntityId, Entity> {
        &self.entities
    }

    /// Add an entity, stamping it with this world's id. Returns its id.
    pub fn spawn(&mut self, mut entity: Entity) -> EntityId {
        entity.world = self.id;
        let id = entity.id;
        tracing::trace!(?id, kind = %entity.kind, "entity spawned");
        self.entities.insert(id, entity);
        id
    }

    /// Remove an entity. Returns it if it existed.
    pub fn despawn(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// Move an entity by `delta`. Returns false if it does not exist.
    pub fn move_by(&mut self, id: EntityId, delta: DVec3) -> bool {
        match self.entities.get_mut(&id) {
            Some(entity) => {
                entity.position += delta;
                true
            }
            None => false,
        }
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self) {
        self.tick += 1;
    }
}

impl HostWorld for World {
    fn id(&self) -> WorldId {
        self.id
    }

    fn tick(&self) -> u64 {
        self.tick
    }

    fn emitter(&self, id: EntityId) -> Option<&dyn LightEmitter> {
        self.entities.get(&id).map(|e| e as &dyn LightEmitter)
    }

    fn emitters(&self) -> Box<dyn Iterator<Item = &dyn LightEmitter> + '_> {
        Box::new(self.entities.values().map(|e| e as &dyn LightEmitter))
    }
}
