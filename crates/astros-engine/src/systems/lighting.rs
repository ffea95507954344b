//! Point and ambient lights for the 3D scene.
//!
//! Lights are persistent: they stay until explicitly removed. Each frame,
//! the runner exposes the active lights to the host renderer's lighting pass.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use crate::components::mesh::MeshColor;

/// A point light with position, color, intensity and cutoff distance.
///
/// Wire format (8 floats / 32 bytes):
/// `[x, y, z, r, g, b, intensity, distance]`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PointLight {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub intensity: f32,
    /// Range beyond which the light contributes nothing. 0 = unlimited.
    pub distance: f32,
}

impl PointLight {
    pub const FLOATS: usize = 8;

    pub fn new(pos: Vec3, color: MeshColor, intensity: f32, distance: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
            r: color.r,
            g: color.g,
            b: color.b,
            intensity,
            distance,
        }
    }

    pub fn with_pos(mut self, pos: Vec3) -> Self {
        self.x = pos.x;
        self.y = pos.y;
        self.z = pos.z;
        self
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }
}

/// Manages active point lights and the ambient term.
///
/// The ambient term defaults to white at intensity 1, which leaves lit
/// materials unchanged when no point lights are present.
pub struct LightState {
    lights: Vec<PointLight>,
    max_lights: usize,
    ambient: MeshColor,
    ambient_intensity: f32,
}

impl LightState {
    pub fn with_capacity(max_lights: usize) -> Self {
        Self {
            lights: Vec::with_capacity(max_lights),
            max_lights,
            ambient: MeshColor::WHITE,
            ambient_intensity: 1.0,
        }
    }

    /// Add a point light. Returns `false` once the capacity is reached.
    pub fn add(&mut self, light: PointLight) -> bool {
        if self.lights.len() >= self.max_lights {
            log::warn!("lighting: capacity {} reached, light dropped", self.max_lights);
            return false;
        }
        self.lights.push(light);
        true
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut PointLight> {
        self.lights.iter_mut()
    }

    pub fn retain<F: FnMut(&PointLight) -> bool>(&mut self, f: F) {
        self.lights.retain(f);
    }

    pub fn count(&self) -> usize {
        self.lights.len()
    }

    pub fn capacity(&self) -> usize {
        self.max_lights
    }

    pub fn set_ambient(&mut self, color: MeshColor, intensity: f32) {
        self.ambient = color;
        self.ambient_intensity = intensity;
    }

    pub fn ambient(&self) -> MeshColor {
        self.ambient
    }

    pub fn ambient_intensity(&self) -> f32 {
        self.ambient_intensity
    }

    /// Ambient color premultiplied by its intensity, as the shader consumes it.
    pub fn ambient_radiance(&self) -> [f32; 3] {
        let k = self.ambient_intensity;
        [self.ambient.r * k, self.ambient.g * k, self.ambient.b * k]
    }

    pub fn buffer_ptr(&self) -> *const f32 {
        self.lights.as_ptr() as *const f32
    }
}

impl Default for LightState {
    fn default() -> Self {
        Self::with_capacity(8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_light_new() {
        let light = PointLight::new(Vec3::ZERO, MeshColor::from_hex(0xffaa00), 5.0, 2000.0);
        assert_eq!(light.pos(), Vec3::ZERO);
        assert_eq!(light.r, 1.0);
        assert!((light.g - 170.0 / 255.0).abs() < 1e-6);
        assert_eq!(light.b, 0.0);
        assert_eq!(light.intensity, 5.0);
        assert_eq!(light.distance, 2000.0);
    }

    #[test]
    fn light_state_add_respects_capacity() {
        let mut state = LightState::with_capacity(2);
        assert!(state.add(PointLight::new(Vec3::ZERO, MeshColor::WHITE, 1.0, 0.0)));
        assert!(state.add(PointLight::new(Vec3::X, MeshColor::WHITE, 1.0, 0.0)));
        assert!(!state.add(PointLight::new(Vec3::Y, MeshColor::WHITE, 1.0, 0.0)));
        assert_eq!(state.count(), 2);

        state.retain(|l| l.x > 0.5);
        assert_eq!(state.count(), 1);
        state.clear();
        assert_eq!(state.count(), 0);
    }

    #[test]
    fn ambient_radiance_scales_color() {
        let mut state = LightState::default();
        assert_eq!(state.ambient_radiance(), [1.0, 1.0, 1.0]);
        state.set_ambient(MeshColor::from_hex(0x333333), 2.0);
        let [r, g, b] = state.ambient_radiance();
        assert!((r - 0.4).abs() < 1e-6);
        assert_eq!(r, g);
        assert_eq!(g, b);
    }

    #[test]
    fn point_light_is_8_floats() {
        assert_eq!(std::mem::size_of::<PointLight>(), PointLight::FLOATS * 4);
    }
}
