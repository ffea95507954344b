//! Orbit controls: drag to rotate around the target, secondary drag to pan,
//! wheel to dolly. Motion is damped: gestures queue deltas that `update`
//! bleeds into the camera a fraction at a time.

use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};
use crate::renderer::camera::PerspectiveCamera;

/// Tuning for [`OrbitControls`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlsConfig {
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per update.
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 1.0,
            max_distance: 4000.0,
        }
    }
}

/// Keeps the polar angle off the poles so `look_at` stays well defined.
const POLAR_EPSILON: f32 = 1e-6;
/// Per-notch dolly factor at zoom speed 1.
const DOLLY_BASE: f32 = 0.95;

pub const BUTTON_PRIMARY: u32 = 0;
pub const BUTTON_SECONDARY: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Gesture {
    None,
    Rotate,
    Pan,
}

/// Camera orbit controller, in the manner of a turntable around `target`.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    config: ControlsConfig,
    gesture: Gesture,
    last_pointer: Vec2,
    /// Pending azimuth / polar change (radians).
    delta_theta: f32,
    delta_phi: f32,
    /// Pending dolly multiplier, applied fully on the next update.
    scale: f32,
    /// Pending target translation.
    pan_offset: Vec3,
    /// Viewport height in pixels; drag distances are relative to it.
    viewport_height: f32,
}

impl OrbitControls {
    pub fn new(config: ControlsConfig, viewport_height: f32) -> Self {
        Self {
            config,
            gesture: Gesture::None,
            last_pointer: Vec2::ZERO,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            viewport_height: viewport_height.max(1.0),
        }
    }

    pub fn config(&self) -> &ControlsConfig {
        &self.config
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        if height > 0.0 {
            self.viewport_height = height;
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture != Gesture::None
    }

    // ── Gestures ──────────────────────────────────────────────────

    pub fn on_pointer_down(&mut self, pos: Vec2, button: u32) {
        self.gesture = match button {
            BUTTON_PRIMARY => Gesture::Rotate,
            BUTTON_SECONDARY => Gesture::Pan,
            _ => Gesture::None,
        };
        self.last_pointer = pos;
    }

    /// Feed a pointer move; `camera` is needed to orient pans.
    pub fn on_pointer_move(&mut self, pos: Vec2, camera: &PerspectiveCamera) {
        let delta = pos - self.last_pointer;
        self.last_pointer = pos;
        match self.gesture {
            Gesture::Rotate => {
                let k = TAU * self.config.rotate_speed / self.viewport_height;
                self.rotate_left(delta.x * k);
                self.rotate_up(delta.y * k);
            }
            Gesture::Pan => self.pan(delta * self.config.pan_speed, camera),
            Gesture::None => {}
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.gesture = Gesture::None;
    }

    /// Wheel: negative `delta_y` moves closer, positive moves away.
    pub fn on_wheel(&mut self, delta_y: f32) {
        let step = DOLLY_BASE.powf(self.config.zoom_speed);
        if delta_y < 0.0 {
            self.scale *= step;
        } else if delta_y > 0.0 {
            self.scale /= step;
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Screen-space pan: moves the target so the scene follows the pointer.
    fn pan(&mut self, delta: Vec2, camera: &PerspectiveCamera) {
        let offset = camera.position - camera.target;
        let target_distance = offset.length() * (camera.fov_rad() / 2.0).tan();
        let view = camera.view_matrix().inverse();
        let right = view.x_axis.truncate();
        let up = view.y_axis.truncate();
        let k = 2.0 * target_distance / self.viewport_height;
        self.pan_offset += right * (-delta.x * k) + up * (delta.y * k);
    }

    // ── Per-frame ─────────────────────────────────────────────────

    /// Apply pending motion to the camera. Returns whether it moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        if self.is_settled() {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
            return false;
        }
        let offset = camera.position - camera.target;
        let mut radius = offset.length();
        if radius <= f32::EPSILON {
            return false;
        }
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        let fraction = if self.config.enable_damping {
            self.config.damping_factor
        } else {
            1.0
        };

        theta += self.delta_theta * fraction;
        phi = (phi + self.delta_phi * fraction).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        radius = (radius * self.scale).clamp(self.config.min_distance, self.config.max_distance);
        let target = camera.target + self.pan_offset * fraction;

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        let new_position = target + new_offset;
        camera.target = target;
        camera.position = new_position;

        if self.config.enable_damping {
            let keep = 1.0 - self.config.damping_factor;
            self.delta_theta *= keep;
            self.delta_phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        true
    }

    /// No pending motion worth applying.
    fn is_settled(&self) -> bool {
        const EPS: f32 = 1e-6;
        self.delta_theta.abs() < EPS
            && self.delta_phi.abs() < EPS
            && (self.scale - 1.0).abs() < EPS
            && self.pan_offset.length_squared() < EPS * EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::CameraConfig;

    fn setup(damping: bool) -> (OrbitControls, PerspectiveCamera) {
        let config = ControlsConfig { enable_damping: damping, ..Default::default() };
        (
            OrbitControls::new(config, 900.0),
            PerspectiveCamera::new(&CameraConfig::default(), 1600.0, 900.0),
        )
    }

    #[test]
    fn idle_update_keeps_camera() {
        let (mut controls, mut cam) = setup(true);
        let before = cam.position;
        assert!(!controls.update(&mut cam));
        assert!((cam.position - before).length() < 1e-3);
    }

    #[test]
    fn horizontal_drag_orbits_at_constant_distance() {
        let (mut controls, mut cam) = setup(false);
        let distance = (cam.position - cam.target).length();
        controls.on_pointer_down(Vec2::new(100.0, 100.0), BUTTON_PRIMARY);
        controls.on_pointer_move(Vec2::new(300.0, 100.0), &cam);
        controls.on_pointer_up();
        assert!(controls.update(&mut cam));
        assert!(((cam.position - cam.target).length() - distance).abs() < 1e-2);
        // Dragging right swings the eye toward -X.
        assert!(cam.position.x < 0.0);
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let (mut controls, mut cam) = setup(true);
        controls.rotate_left(1.0);
        let start = cam.position;
        controls.update(&mut cam);
        let first_step = (cam.position - start).length();
        let mid = cam.position;
        controls.update(&mut cam);
        let second_step = (cam.position - mid).length();
        assert!(first_step > 0.0);
        assert!(second_step < first_step);
    }

    #[test]
    fn wheel_dollies_within_limits() {
        let (mut controls, mut cam) = setup(true);
        let distance = (cam.position - cam.target).length();
        controls.on_wheel(-120.0);
        controls.update(&mut cam);
        let closer = (cam.position - cam.target).length();
        assert!((closer - distance * 0.95).abs() < 1e-2);

        for _ in 0..500 {
            controls.on_wheel(120.0);
            controls.update(&mut cam);
        }
        let far = (cam.position - cam.target).length();
        assert!(far <= controls.config().max_distance + 1e-2);
    }

    #[test]
    fn polar_angle_never_flips() {
        let (mut controls, mut cam) = setup(false);
        controls.rotate_up(-10.0);
        controls.update(&mut cam);
        let below = cam.position - cam.target;
        assert!(below.y < 0.0);

        // Pushing past the pole stays clamped below the target.
        controls.rotate_up(-1.0);
        controls.update(&mut cam);
        let still_below = cam.position - cam.target;
        assert!(still_below.y < 0.0);
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn secondary_drag_moves_target() {
        let (mut controls, mut cam) = setup(false);
        controls.on_pointer_down(Vec2::new(0.0, 0.0), BUTTON_SECONDARY);
        controls.on_pointer_move(Vec2::new(50.0, 0.0), &cam);
        assert!(controls.is_dragging());
        controls.update(&mut cam);
        assert!(cam.target.x < 0.0);
        controls.on_pointer_up();
        assert!(!controls.is_dragging());
    }
}
