use bytemuck::{Pod, Zeroable};

/// Per-body render data read by the host renderer.
/// Must match the TypeScript protocol: 16 floats = 64 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// World-space position.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Uniform world scale.
    pub scale: f32,
    /// World rotation quaternion (x, y, z, w).
    pub qx: f32,
    pub qy: f32,
    pub qz: f32,
    pub qw: f32,
    /// Flat material color.
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Texture id, or -1 for the flat material.
    pub texture: f32,
    /// 0 = sphere, 1 = ring.
    pub shape_kind: f32,
    /// Sphere: radius. Ring: first vertex in the ring buffer.
    pub param0: f32,
    /// Sphere: segments. Ring: vertex count.
    pub param1: f32,
    /// Material flag bits (unlit, double-sided, transparent).
    pub flags: f32,
}

impl BodyInstance {
    pub const FLOATS: usize = 16;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
    pub const NO_TEXTURE: f32 = -1.0;
}

/// Body instances for one frame: opaque bodies first, then transparent ones
/// starting at `transparent_split` so the host can draw them last.
pub struct RenderBuffer {
    pub instances: Vec<BodyInstance>,
    pub transparent_split: u32,
    max_instances: usize,
}

impl RenderBuffer {
    pub fn with_capacity(max_instances: usize) -> Self {
        Self {
            instances: Vec::with_capacity(max_instances),
            transparent_split: 0,
            max_instances,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.transparent_split = 0;
    }

    /// Append an instance. Returns `false` when the buffer is full.
    pub fn push(&mut self, instance: BodyInstance) -> bool {
        if self.instances.len() >= self.max_instances {
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn set_transparent_split(&mut self, split: u32) {
        self.transparent_split = split;
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.max_instances
    }

    /// Raw pointer to instance data for host reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}
