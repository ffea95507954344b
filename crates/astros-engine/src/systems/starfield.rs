use bytemuck::{Pod, Zeroable};
use crate::components::mesh::MeshColor;
use crate::systems::rng::Rng;

/// One background star. 3 floats = 12 bytes.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct StarVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl StarVertex {
    pub const FLOATS: usize = 3;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarfieldConfig {
    pub count: usize,
    /// Edge length of the cube the stars are scattered in, centered on the origin.
    pub extent: f32,
    /// Point size in pixels, forwarded to the renderer.
    pub size: f32,
    pub color: MeshColor,
}

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 1000,
            extent: 5000.0,
            size: 2.0,
            color: MeshColor::WHITE,
        }
    }
}

/// Static point cloud behind the scene, generated once.
#[derive(Debug, Clone, Default)]
pub struct Starfield {
    stars: Vec<StarVertex>,
    size: f32,
    color: MeshColor,
}

impl Starfield {
    pub fn generate(config: &StarfieldConfig, rng: &mut Rng) -> Self {
        let half = config.extent * 0.5;
        let stars = (0..config.count)
            .map(|_| StarVertex {
                x: rng.range(-half, half),
                y: rng.range(-half, half),
                z: rng.range(-half, half),
            })
            .collect();
        Self {
            stars,
            size: config.size,
            color: config.color,
        }
    }

    pub fn stars(&self) -> &[StarVertex] {
        &self.stars
    }

    pub fn count(&self) -> usize {
        self.stars.len()
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn color(&self) -> MeshColor {
        self.color
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.stars.as_ptr() as *const f32
    }
}
