use crate::api::types::TextureId;
use crate::systems::rings::RingGeometry;

/// Linear RGB color for mesh materials.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl MeshColor {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as f32 / 255.0,
            g: ((hex >> 8) & 0xff) as f32 / 255.0,
            b: (hex & 0xff) as f32 / 255.0,
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for MeshColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Geometry a mesh is built from. The host renderer builds the actual
/// vertex data for spheres; ring triangles are tessellated in Rust.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshShape {
    Sphere { radius: f32, segments: u32 },
    Ring(RingGeometry),
}

impl MeshShape {
    /// Wire discriminant written into body instances.
    pub fn kind(&self) -> f32 {
        match self {
            MeshShape::Sphere { .. } => 0.0,
            MeshShape::Ring(_) => 1.0,
        }
    }

    /// Radius of the bounding sphere in local units.
    pub fn bounding_radius(&self) -> f32 {
        match self {
            MeshShape::Sphere { radius, .. } => *radius,
            MeshShape::Ring(ring) => ring.outer,
        }
    }
}

/// Surface description. `texture` is only honoured by the renderer once the
/// registry reports it ready; until then the flat `color` is used.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: MeshColor,
    pub texture: Option<TextureId>,
    /// Skip lighting entirely (basic material).
    pub unlit: bool,
    pub double_sided: bool,
    pub transparent: bool,
}

impl Material {
    pub const FLAG_UNLIT: u32 = 1;
    pub const FLAG_DOUBLE_SIDED: u32 = 2;
    pub const FLAG_TRANSPARENT: u32 = 4;

    pub fn flags(&self) -> u32 {
        let mut flags = 0;
        if self.unlit {
            flags |= Self::FLAG_UNLIT;
        }
        if self.double_sided {
            flags |= Self::FLAG_DOUBLE_SIDED;
        }
        if self.transparent {
            flags |= Self::FLAG_TRANSPARENT;
        }
        flags
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: MeshColor::WHITE,
            texture: None,
            unlit: true,
            double_sided: false,
            transparent: false,
        }
    }
}

/// Renderable mesh attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshComponent {
    pub shape: MeshShape,
    pub material: Material,
}

impl MeshComponent {
    pub fn sphere(radius: f32, segments: u32) -> Self {
        Self {
            shape: MeshShape::Sphere { radius, segments },
            material: Material::default(),
        }
    }

    pub fn ring(geometry: RingGeometry) -> Self {
        Self {
            shape: MeshShape::Ring(geometry),
            material: Material::default(),
        }
    }

    pub fn with_texture(mut self, texture: TextureId) -> Self {
        self.material.texture = Some(texture);
        self
    }

    pub fn with_color(mut self, color: MeshColor) -> Self {
        self.material.color = color;
        self
    }

    pub fn double_sided(mut self) -> Self {
        self.material.double_sided = true;
        self
    }

    pub fn transparent(mut self) -> Self {
        self.material.transparent = true;
        self
    }

    pub fn lit(mut self) -> Self {
        self.material.unlit = false;
        self
    }
}
