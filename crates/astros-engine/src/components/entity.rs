use glam::{Quat, Vec3};
use crate::api::types::EntityId;
use crate::components::mesh::MeshComponent;

/// Fat Entity: a single struct with optional components.
///
/// `pos`, `rotation` and `scale` are world-space. Entities that live in the
/// [`TransformGraph`](crate::extensions::transform::TransformGraph) get them
/// rewritten on every propagate; everything else is placed directly.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are not rendered).
    pub active: bool,
    pub pos: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    /// Mesh component (optional; entities without meshes are invisible).
    pub mesh: Option<MeshComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            mesh: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.pos = pos;
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

    pub fn with_mesh(mut self, mesh: MeshComponent) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// World-space bounding sphere radius, if the entity has a mesh.
    pub fn bounding_radius(&self) -> Option<f32> {
        self.mesh
            .as_ref()
            .map(|m| m.shape.bounding_radius() * self.scale.max_element())
    }
}
