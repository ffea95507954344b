use bytemuck::{Pod, Zeroable};
use serde::Serialize;

/// Unique identifier for an entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Handle to a texture slot in the [`TextureRegistry`](crate::assets::registry::TextureRegistry).
/// The numeric value is the index the host renderer uses for its texture array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// A game event communicated from Rust to the host once per frame.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: f32, a: f32) -> Self {
        Self { kind, a, b: 0.0, c: 0.0 }
    }
}

/// Informational card shown by the UI for the selected body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfoCard {
    pub name: String,
    pub fact: String,
}
