// extensions/transform.rs
//
// Transform hierarchy: parent-child relationships by EntityId.
// Decoupled from Entity/Scene internals: the graph owns local transforms,
// `propagate` writes the composed world transforms back into the Scene.
//
// Usage:
//   let mut graph = TransformGraph::new();
//   graph.register_with(planet, LocalTransform::from_offset(p));
//   graph.register_with(moon, LocalTransform::from_offset(m));
//   graph.set_parent(moon, Some(planet));
//   graph.propagate(&mut scene);  // moon.pos = planet world * m

use std::collections::HashMap;
use glam::{Affine3A, Quat, Vec3};
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Transform relative to the parent (or to the world for roots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub offset: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            offset: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_offset(offset: Vec3) -> Self {
        Self { offset, ..Self::default() }
    }

    pub fn with_offset(mut self, offset: Vec3) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn to_affine(&self) -> Affine3A {
        Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.offset)
    }
}

/// World transform of a child: `parent * local`.
///
/// The local offset is scaled and rotated by the parent before translation,
/// so a child orbiting a moving parent follows it without tracking it.
pub fn compose(parent: &Affine3A, local: &LocalTransform) -> Affine3A {
    *parent * local.to_affine()
}

#[derive(Debug, Clone, Default)]
struct TransformNode {
    parent: Option<EntityId>,
    children: Vec<EntityId>,
    local: LocalTransform,
}

/// Transform hierarchy graph.
///
/// Roots are kept in registration order so propagation order is stable.
#[derive(Debug, Default)]
pub struct TransformGraph {
    nodes: HashMap<EntityId, TransformNode>,
    roots: Vec<EntityId>,
    /// Set on any change, cleared after propagate.
    dirty: bool,
}

impl TransformGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an entity as a root with a specific local transform.
    pub fn register_with(&mut self, id: EntityId, local: LocalTransform) {
        let node = self.nodes.entry(id).or_default();
        node.local = local;
        if node.parent.is_none() && !self.roots.contains(&id) {
            self.roots.push(id);
        }
        self.dirty = true;
    }

    /// Re-parent an entity. `None` makes it a root. Unknown ids are registered
    /// with an identity transform.
    pub fn set_parent(&mut self, child: EntityId, parent: Option<EntityId>) {
        if parent == Some(child) {
            log::warn!("transform graph: {:?} cannot parent itself", child);
            return;
        }
        self.nodes.entry(child).or_default();
        if let Some(p) = parent {
            if !self.nodes.contains_key(&p) {
                self.register_with(p, LocalTransform::default());
            }
        }

        if let Some(old) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(old_node) = self.nodes.get_mut(&old) {
                old_node.children.retain(|&c| c != child);
            }
        }

        if let Some(node) = self.nodes.get_mut(&child) {
            node.parent = parent;
        }

        match parent {
            Some(p) => {
                if let Some(parent_node) = self.nodes.get_mut(&p) {
                    if !parent_node.children.contains(&child) {
                        parent_node.children.push(child);
                    }
                }
                self.roots.retain(|&r| r != child);
            }
            None => {
                if !self.roots.contains(&child) {
                    self.roots.push(child);
                }
            }
        }

        self.dirty = true;
    }

    pub fn set_local(&mut self, id: EntityId, local: LocalTransform) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local = local;
            self.dirty = true;
        }
    }

    /// Move an entity within its parent's frame, keeping rotation and scale.
    pub fn set_offset(&mut self, id: EntityId, offset: Vec3) {
        if let Some(node) = self.nodes.get_mut(&id) {
            node.local.offset = offset;
            self.dirty = true;
        }
    }

    pub fn get_local(&self, id: EntityId) -> Option<&LocalTransform> {
        self.nodes.get(&id).map(|n| &n.local)
    }

    pub fn get_parent(&self, id: EntityId) -> Option<EntityId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn get_children(&self, id: EntityId) -> Option<&[EntityId]> {
        self.nodes.get(&id).map(|n| n.children.as_slice())
    }

    /// Compose the world transform of one entity by walking up its parents.
    pub fn world_transform(&self, id: EntityId) -> Option<Affine3A> {
        let node = self.nodes.get(&id)?;
        let parent = match node.parent {
            Some(p) => self.world_transform(p)?,
            None => Affine3A::IDENTITY,
        };
        Some(compose(&parent, &node.local))
    }

    /// Push world transforms from roots down into the scene entities.
    pub fn propagate(&mut self, scene: &mut Scene) {
        if !self.dirty {
            return;
        }
        for &root in &self.roots {
            self.propagate_recursive(root, &Affine3A::IDENTITY, scene);
        }
        self.dirty = false;
    }

    fn propagate_recursive(&self, id: EntityId, parent: &Affine3A, scene: &mut Scene) {
        let Some(node) = self.nodes.get(&id) else { return };
        let world = compose(parent, &node.local);

        if let Some(entity) = scene.get_mut(id) {
            let (scale, rotation, translation) = world.to_scale_rotation_translation();
            entity.pos = translation;
            entity.rotation = rotation;
            entity.scale = scale;
        }

        for &child in &node.children {
            self.propagate_recursive(child, &world, scene);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::entity::Entity;
    use std::f32::consts::FRAC_PI_2;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn parent_child_relationship() {
        let mut graph = TransformGraph::new();
        let parent = EntityId(1);
        let child = EntityId(2);

        graph.register_with(parent, LocalTransform::new());
        graph.register_with(child, LocalTransform::new());
        graph.set_parent(child, Some(parent));

        assert_eq!(graph.get_parent(child), Some(parent));
        assert_eq!(graph.get_children(parent), Some([child].as_slice()));
        assert!(!graph.roots.contains(&child));
    }

    #[test]
    fn child_follows_parent_translation() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let planet = EntityId(1);
        let moon = EntityId(2);
        scene.spawn(Entity::new(planet));
        scene.spawn(Entity::new(moon));

        graph.register_with(planet, LocalTransform::from_offset(Vec3::new(120.0, 0.0, 0.0)));
        graph.register_with(moon, LocalTransform::from_offset(Vec3::new(15.0, 0.0, 0.0)));
        graph.set_parent(moon, Some(planet));
        graph.propagate(&mut scene);
        assert!(close(scene.get(moon).unwrap().pos, Vec3::new(135.0, 0.0, 0.0)));

        graph.set_offset(planet, Vec3::new(0.0, 0.0, 120.0));
        graph.propagate(&mut scene);
        assert!(close(scene.get(moon).unwrap().pos, Vec3::new(15.0, 0.0, 120.0)));
    }

    #[test]
    fn compose_applies_parent_rotation_and_scale() {
        let parent = LocalTransform::from_offset(Vec3::new(10.0, 0.0, 0.0))
            .with_rotation(Quat::from_rotation_y(FRAC_PI_2))
            .with_scale(Vec3::splat(2.0))
            .to_affine();
        let local = LocalTransform::from_offset(Vec3::new(1.0, 0.0, 0.0));
        let world = compose(&parent, &local);
        // +X rotated a quarter turn about Y is -Z, then doubled.
        assert!(close(world.translation.into(), Vec3::new(10.0, 0.0, -2.0)));
    }

    #[test]
    fn world_transform_matches_propagate() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let a = EntityId(1);
        let b = EntityId(2);
        scene.spawn(Entity::new(a));
        scene.spawn(Entity::new(b));
        graph.register_with(a, LocalTransform::from_offset(Vec3::new(3.0, 4.0, 5.0)));
        graph.register_with(b, LocalTransform::from_offset(Vec3::new(0.0, 1.0, 0.0))
            .with_rotation(Quat::from_rotation_x(-1.0)));
        graph.set_parent(b, Some(a));
        graph.propagate(&mut scene);

        let world = graph.world_transform(b).unwrap();
        assert!(close(world.translation.into(), scene.get(b).unwrap().pos));
        assert!(graph.world_transform(EntityId(99)).is_none());
    }

    #[test]
    fn propagate_skips_when_clean() {
        let mut graph = TransformGraph::new();
        let mut scene = Scene::new();
        let id = EntityId(1);
        scene.spawn(Entity::new(id));
        graph.register_with(id, LocalTransform::from_offset(Vec3::X));
        graph.propagate(&mut scene);
        assert!(!graph.is_dirty());

        // Direct scene edits survive until the graph changes again.
        scene.get_mut(id).unwrap().pos = Vec3::Y;
        graph.propagate(&mut scene);
        assert_eq!(scene.get(id).unwrap().pos, Vec3::Y);
    }

    #[test]
    fn self_parenting_is_refused() {
        let mut graph = TransformGraph::new();
        let id = EntityId(1);
        graph.register_with(id, LocalTransform::new());
        graph.set_parent(id, Some(id));
        assert_eq!(graph.get_parent(id), None);
    }
}
