//! Flat buffer layout shared with the host renderer.
//! Must stay in sync with TypeScript `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Bodies: max_bodies × 16 floats]
//! [Camera: 36 floats]
//! [Stars: max_stars × 3 floats]
//! [Ring vertices: max_ring_vertices × 4 floats]
//! [Lights: max_lights × 8 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header every frame alongside the counts.
//! TypeScript reads them from the header to compute offsets dynamically.

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_BODIES: usize = 2;
pub const HEADER_BODY_COUNT: usize = 3;
pub const HEADER_MAX_STARS: usize = 4;
pub const HEADER_STAR_COUNT: usize = 5;
pub const HEADER_MAX_RING_VERTICES: usize = 6;
pub const HEADER_RING_VERTEX_COUNT: usize = 7;
pub const HEADER_MAX_LIGHTS: usize = 8;
pub const HEADER_LIGHT_COUNT: usize = 9;
pub const HEADER_MAX_EVENTS: usize = 10;
pub const HEADER_EVENT_COUNT: usize = 11;
pub const HEADER_VIEWPORT_WIDTH: usize = 12;
pub const HEADER_VIEWPORT_HEIGHT: usize = 13;
pub const HEADER_STAR_SIZE: usize = 14;
pub const HEADER_RESERVED: usize = 15;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per body instance (wire format, never changes).
pub const BODY_FLOATS: usize = 16;
/// Floats in the camera block: view, projection, eye + fov.
pub const CAMERA_FLOATS: usize = 36;
/// Floats per star: x, y, z.
pub const STAR_FLOATS: usize = 3;
/// Floats per ring vertex: x, y, u, v.
pub const RING_VERTEX_FLOATS: usize = 4;
/// Floats per point light: x, y, z, r, g, b, intensity, distance.
pub const LIGHT_FLOATS: usize = 8;
/// Floats per game event: kind, a, b, c.
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    pub max_bodies: usize,
    pub max_stars: usize,
    pub max_ring_vertices: usize,
    pub max_lights: usize,
    pub max_events: usize,

    /// Section sizes in floats.
    pub body_data_floats: usize,
    pub camera_data_floats: usize,
    pub star_data_floats: usize,
    pub ring_data_floats: usize,
    pub light_data_floats: usize,
    pub event_data_floats: usize,

    /// Section offsets in floats.
    pub body_data_offset: usize,
    pub camera_data_offset: usize,
    pub star_data_offset: usize,
    pub ring_data_offset: usize,
    pub light_data_offset: usize,
    pub event_data_offset: usize,

    pub buffer_total_floats: usize,
    pub buffer_total_bytes: usize,
}

/// Live counts written into the header for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameCounts {
    pub frame: u64,
    pub bodies: usize,
    pub stars: usize,
    pub ring_vertices: usize,
    pub lights: usize,
    pub events: usize,
    pub viewport_width: f32,
    pub viewport_height: f32,
    pub star_size: f32,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(
        max_bodies: usize,
        max_stars: usize,
        max_ring_vertices: usize,
        max_lights: usize,
        max_events: usize,
    ) -> Self {
        let body_data_floats = max_bodies * BODY_FLOATS;
        let camera_data_floats = CAMERA_FLOATS;
        let star_data_floats = max_stars * STAR_FLOATS;
        let ring_data_floats = max_ring_vertices * RING_VERTEX_FLOATS;
        let light_data_floats = max_lights * LIGHT_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let body_data_offset = HEADER_FLOATS;
        let camera_data_offset = body_data_offset + body_data_floats;
        let star_data_offset = camera_data_offset + camera_data_floats;
        let ring_data_offset = star_data_offset + star_data_floats;
        let light_data_offset = ring_data_offset + ring_data_floats;
        let event_data_offset = light_data_offset + light_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_bodies,
            max_stars,
            max_ring_vertices,
            max_lights,
            max_events,
            body_data_floats,
            camera_data_floats,
            star_data_floats,
            ring_data_floats,
            light_data_floats,
            event_data_floats,
            body_data_offset,
            camera_data_offset,
            star_data_offset,
            ring_data_offset,
            light_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(
            config.max_bodies,
            config.starfield.count,
            config.max_ring_vertices,
            config.max_lights,
            config.max_events,
        )
    }

    /// Fill a header block for one frame. Counts are clamped to capacity.
    pub fn write_header(&self, header: &mut [f32; HEADER_FLOATS], counts: &FrameCounts) {
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        // f32 counts exactly up to 2^24 frames; wrap well before that.
        header[HEADER_FRAME_COUNTER] = (counts.frame % (1 << 24)) as f32;
        header[HEADER_MAX_BODIES] = self.max_bodies as f32;
        header[HEADER_BODY_COUNT] = counts.bodies.min(self.max_bodies) as f32;
        header[HEADER_MAX_STARS] = self.max_stars as f32;
        header[HEADER_STAR_COUNT] = counts.stars.min(self.max_stars) as f32;
        header[HEADER_MAX_RING_VERTICES] = self.max_ring_vertices as f32;
        header[HEADER_RING_VERTEX_COUNT] = counts.ring_vertices.min(self.max_ring_vertices) as f32;
        header[HEADER_MAX_LIGHTS] = self.max_lights as f32;
        header[HEADER_LIGHT_COUNT] = counts.lights.min(self.max_lights) as f32;
        header[HEADER_MAX_EVENTS] = self.max_events as f32;
        header[HEADER_EVENT_COUNT] = counts.events.min(self.max_events) as f32;
        header[HEADER_VIEWPORT_WIDTH] = counts.viewport_width;
        header[HEADER_VIEWPORT_HEIGHT] = counts.viewport_height;
        header[HEADER_STAR_SIZE] = counts.star_size;
        header[HEADER_RESERVED] = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::GameEvent;
    use crate::renderer::camera::CameraUniform;
    use crate::renderer::instance::BodyInstance;
    use crate::systems::lighting::PointLight;
    use crate::systems::rings::RingVertex;
    use crate::systems::starfield::StarVertex;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let config = GameConfig::default();
        let layout = ProtocolLayout::from_config(&config);

        assert_eq!(layout.max_bodies, config.max_bodies);
        assert_eq!(layout.max_stars, 1000);
        assert_eq!(layout.body_data_floats, config.max_bodies * 16);
        assert_eq!(layout.camera_data_floats, 36);
        assert_eq!(layout.star_data_floats, 3000);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn custom_capacities_compute_correctly() {
        let layout = ProtocolLayout::new(32, 500, 2048, 4, 16);
        let expected_total = HEADER_FLOATS + 32 * 16 + 36 + 500 * 3 + 2048 * 4 + 4 * 8 + 16 * 4;
        assert_eq!(layout.buffer_total_floats, expected_total);
        assert_eq!(layout.buffer_total_bytes, expected_total * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(10, 20, 30, 2, 8);

        assert_eq!(layout.body_data_offset, HEADER_FLOATS);
        assert_eq!(layout.camera_data_offset, layout.body_data_offset + layout.body_data_floats);
        assert_eq!(layout.star_data_offset, layout.camera_data_offset + layout.camera_data_floats);
        assert_eq!(layout.ring_data_offset, layout.star_data_offset + layout.star_data_floats);
        assert_eq!(layout.light_data_offset, layout.ring_data_offset + layout.ring_data_floats);
        assert_eq!(layout.event_data_offset, layout.light_data_offset + layout.light_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn wire_structs_match_float_counts() {
        use std::mem::size_of;
        assert_eq!(size_of::<BodyInstance>(), BODY_FLOATS * 4);
        assert_eq!(size_of::<CameraUniform>(), CAMERA_FLOATS * 4);
        assert_eq!(size_of::<StarVertex>(), STAR_FLOATS * 4);
        assert_eq!(size_of::<RingVertex>(), RING_VERTEX_FLOATS * 4);
        assert_eq!(size_of::<PointLight>(), LIGHT_FLOATS * 4);
        assert_eq!(size_of::<GameEvent>(), EVENT_FLOATS * 4);
    }

    #[test]
    fn header_clamps_counts() {
        let layout = ProtocolLayout::new(4, 10, 0, 1, 2);
        let mut header = [0.0; HEADER_FLOATS];
        layout.write_header(&mut header, &FrameCounts {
            frame: 7,
            bodies: 9,
            stars: 10,
            lights: 1,
            events: 0,
            viewport_width: 800.0,
            viewport_height: 600.0,
            star_size: 2.0,
            ..Default::default()
        });
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_FRAME_COUNTER], 7.0);
        assert_eq!(header[HEADER_BODY_COUNT], 4.0);
        assert_eq!(header[HEADER_STAR_COUNT], 10.0);
        assert_eq!(header[HEADER_VIEWPORT_HEIGHT], 600.0);
    }
}
