use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use crate::core::ray::Ray;

/// Startup parameters for the perspective camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 5000.0,
            position: Vec3::new(0.0, 50.0, 300.0),
            target: Vec3::ZERO,
        }
    }
}

/// Perspective camera looking from `position` at `target`, Y up.
///
/// Right-handed, clip depth in [0, 1] (WebGPU convention).
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_deg: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

/// GPU-side camera block: 16 + 16 + 4 = 36 floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],
    /// Eye position (xyz) and vertical FOV in radians (w).
    pub eye_fov: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 36;
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, viewport_width: f32, viewport_height: f32) -> Self {
        let mut camera = Self {
            fov_deg: config.fov_deg,
            aspect: 1.0,
            near: config.near,
            far: config.far,
            position: config.position,
            target: config.target,
            up: Vec3::Y,
        };
        camera.resize(viewport_width, viewport_height);
        camera
    }

    /// Recompute the aspect ratio for a new viewport. A zero-sized viewport
    /// (hidden or collapsed surface) keeps the previous aspect.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !(width > 0.0 && height > 0.0) {
            return false;
        }
        self.aspect = width / height;
        true
    }

    pub fn fov_rad(&self) -> f32 {
        self.fov_deg.to_radians()
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_rad(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Ray from the eye through a point in normalized device coordinates
    /// (x right, y up, both in [-1, 1]).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let through = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, through - self.position)
    }

    /// Project a world point to NDC. `None` when the point is behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(clip.truncate() / clip.w)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view: self.view_matrix().to_cols_array_2d(),
            projection: self.projection_matrix().to_cols_array_2d(),
            eye_fov: [self.position.x, self.position.y, self.position.z, self.fov_rad()],
        }
    }
}
