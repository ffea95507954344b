//! Circular orbital advancement: pure math, no engine dependencies.
//!
//! Every body moves on a circle in the XZ plane of its parent's frame. The
//! height `y` is fixed at setup and never touched by advancement.

use std::f32::consts::TAU;
use glam::Vec3;

/// Circular orbit state for one planet or moon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalBody {
    pub orbit_radius: f32,
    /// Radians per frame; the sign picks the direction.
    pub angular_speed: f32,
    /// Current angle in radians. Not wrapped; sin/cos take care of it.
    pub angle: f32,
    /// Fixed height above the parent's orbital plane.
    pub y: f32,
}

impl OrbitalBody {
    pub fn new(orbit_radius: f32, angular_speed: f32, angle: f32, y: f32) -> Self {
        Self {
            orbit_radius,
            angular_speed,
            angle,
            y,
        }
    }

    /// Draw a start angle uniformly from `[0, 2π)` given a unit sample.
    pub fn start_angle(unit: f32) -> f32 {
        unit * TAU
    }

    /// Step one frame forward.
    pub fn advance(&mut self) {
        self.angle += self.angular_speed;
    }

    /// Position in the parent's frame for the current angle.
    pub fn local_position(&self) -> Vec3 {
        Vec3::new(
            self.orbit_radius * self.angle.cos(),
            self.y,
            self.orbit_radius * self.angle.sin(),
        )
    }
}
