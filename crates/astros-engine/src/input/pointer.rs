//! Pointer position tracking and client-to-NDC mapping.

use glam::Vec2;

/// Bounding rectangle of the render surface in client (CSS pixel) space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SurfaceRect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl SurfaceRect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Map a client position to normalized device coordinates: x right and
/// y up, both in [-1, 1] over the rectangle. `None` for a degenerate rect.
pub fn to_ndc(client_x: f32, client_y: f32, rect: &SurfaceRect) -> Option<Vec2> {
    if rect.is_degenerate() {
        return None;
    }
    Some(Vec2::new(
        ((client_x - rect.left) / rect.width) * 2.0 - 1.0,
        -((client_y - rect.top) / rect.height) * 2.0 + 1.0,
    ))
}

/// Last known pointer state. The NDC position survives moves reported
/// against a degenerate rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub client: Vec2,
    pub ndc: Vec2,
}

impl PointerState {
    pub fn moved(&mut self, client: Vec2, ndc: Option<Vec2>) {
        self.client = client;
        if let Some(ndc) = ndc {
            self.ndc = ndc;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-6
    }

    #[test]
    fn corners_and_center() {
        let rect = SurfaceRect::new(10.0, 20.0, 800.0, 600.0);
        assert!(close(to_ndc(10.0, 20.0, &rect).unwrap(), Vec2::new(-1.0, 1.0)));
        assert!(close(to_ndc(810.0, 620.0, &rect).unwrap(), Vec2::new(1.0, -1.0)));
        assert!(close(to_ndc(410.0, 320.0, &rect).unwrap(), Vec2::ZERO));
    }

    #[test]
    fn degenerate_rect_yields_nothing() {
        assert!(to_ndc(5.0, 5.0, &SurfaceRect::new(0.0, 0.0, 0.0, 600.0)).is_none());
        assert!(to_ndc(5.0, 5.0, &SurfaceRect::new(0.0, 0.0, 800.0, 0.0)).is_none());
    }

    #[test]
    fn pointer_keeps_ndc_on_degenerate_move() {
        let mut pointer = PointerState::default();
        pointer.moved(Vec2::new(1.0, 1.0), Some(Vec2::new(0.25, 0.5)));
        pointer.moved(Vec2::new(2.0, 2.0), None);
        assert_eq!(pointer.client, Vec2::new(2.0, 2.0));
        assert_eq!(pointer.ndc, Vec2::new(0.25, 0.5));
    }
}
