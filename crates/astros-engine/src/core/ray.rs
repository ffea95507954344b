//! Rays and ray-sphere intersection for pointer picking.

use glam::Vec3;

/// A half-line from `origin` along a unit `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Where a ray met a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray from its origin.
    pub distance: f32,
    /// World-space hit point.
    pub point: Vec3,
}

impl Ray {
    /// Create a ray; `direction` is normalized. A zero direction yields a
    /// ray that never hits anything.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Nearest non-negative intersection with a sphere.
    ///
    /// An origin inside the sphere reports the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<RayHit> {
        if radius <= 0.0 || self.direction == Vec3::ZERO {
            return None;
        }

        // Unit direction, so the quadratic's `a` term is 1.
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_d = discriminant.sqrt();
        let near = -b - sqrt_d;
        let far = -b + sqrt_d;
        let t = if near >= 0.0 {
            near
        } else if far >= 0.0 {
            far
        } else {
            return None;
        };

        Some(RayHit {
            distance: t,
            point: self.at(t),
        })
    }
}
