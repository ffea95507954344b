use std::collections::HashMap;
use crate::api::types::EntityId;
use crate::components::entity::Entity;

/// Entity storage: a flat Vec in spawn order plus an id index.
///
/// Built once at scene setup and iterated every frame; spawn order is the
/// render order. Sized for dozens of entities, not thousands.
pub struct Scene {
    entities: Vec<Entity>,
    index: HashMap<EntityId, usize>,
}

impl Scene {
    pub fn new() -> Self {
        Self::with_capacity(32)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entities: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Add an entity. Spawning an id that already exists replaces it in place.
    pub fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = entity.id;
        match self.index.get(&id) {
            Some(&slot) => self.entities[slot] = entity,
            None => {
                self.index.insert(id, self.entities.len());
                self.entities.push(entity);
            }
        }
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.index.get(&id).map(|&slot| &self.entities[slot])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        let slot = *self.index.get(&id)?;
        self.entities.get_mut(slot)
    }

    /// Iterate in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn find_by_tag(&self, tag: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every entity (view teardown).
    pub fn clear(&mut self) {
        self.entities.clear();
        self.index.clear();
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
