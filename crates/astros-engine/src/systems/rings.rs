//! Lyon-based ring (annulus) tessellation.
//!
//! Rings are tessellated once, when they are added, into a persistent
//! triangle list shared by every ring in the scene. A ring mesh refers to its
//! slice of that list by vertex range.
//!
//! # Usage
//!
//! ```ignore
//! let geometry = ctx.rings.add(27.0, 45.0, 128).unwrap();
//! ctx.scene.spawn(Entity::new(id).with_mesh(MeshComponent::ring(geometry)));
//! ```

use bytemuck::{Pod, Zeroable};
use lyon::math::point;
use lyon::path::Path;
use lyon::tessellation::{
    BuffersBuilder, FillOptions, FillRule, FillTessellator, FillVertex, FillVertexConstructor,
    VertexBuffers,
};
use std::f32::consts::TAU;

/// Ring vertex in the ring's local plane with its texture coordinate.
/// 4 floats = 16 bytes per vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RingVertex {
    pub x: f32,
    pub y: f32,
    pub u: f32,
    pub v: f32,
}

impl RingVertex {
    pub const FLOATS: usize = 4;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// A tessellated annulus: its radii and where its triangles live in the
/// shared ring vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    pub inner: f32,
    pub outer: f32,
    pub segments: u32,
    /// First vertex in the shared buffer.
    pub start: u32,
    /// Vertex count (a multiple of 3).
    pub count: u32,
}

/// Planar UV: the outer circle maps onto the unit square.
struct RingVertexCtor {
    outer: f32,
}

impl FillVertexConstructor<RingVertex> for RingVertexCtor {
    fn new_vertex(&mut self, vertex: FillVertex) -> RingVertex {
        let p = vertex.position();
        RingVertex {
            x: p.x,
            y: p.y,
            u: ((p.x / self.outer + 1.0) * 0.5).clamp(0.0, 1.0),
            v: ((p.y / self.outer + 1.0) * 0.5).clamp(0.0, 1.0),
        }
    }
}

/// Persistent ring triangles for the whole scene.
pub struct RingMeshes {
    tess: FillTessellator,
    geometry: VertexBuffers<RingVertex, u32>,
    vertices: Vec<RingVertex>,
    max_vertices: usize,
}

impl RingMeshes {
    pub fn new(max_vertices: usize) -> Self {
        Self {
            tess: FillTessellator::new(),
            geometry: VertexBuffers::new(),
            vertices: Vec::with_capacity(max_vertices),
            max_vertices,
        }
    }

    /// Tessellate an annulus with `segments` points per circle.
    ///
    /// Returns `None` for degenerate radii, fewer than 3 segments, a
    /// tessellation failure, or when the vertex buffer is full.
    pub fn add(&mut self, inner: f32, outer: f32, segments: u32) -> Option<RingGeometry> {
        if !(inner >= 0.0 && outer > inner) || segments < 3 {
            log::warn!("rings: invalid annulus inner={} outer={} segments={}", inner, outer, segments);
            return None;
        }

        let mut builder = Path::builder();
        add_circle_polygon(&mut builder, outer, segments);
        if inner > 0.0 {
            add_circle_polygon(&mut builder, inner, segments);
        }
        let path = builder.build();

        self.geometry.vertices.clear();
        self.geometry.indices.clear();
        let result = self.tess.tessellate_path(
            &path,
            &FillOptions::tolerance(0.01).with_fill_rule(FillRule::EvenOdd),
            &mut BuffersBuilder::new(&mut self.geometry, RingVertexCtor { outer }),
        );
        if let Err(e) = result {
            log::warn!("rings: tessellation failed: {:?}", e);
            return None;
        }

        let count = self.geometry.indices.len();
        if self.vertices.len() + count > self.max_vertices {
            log::warn!(
                "rings: buffer full ({} + {} > {})",
                self.vertices.len(),
                count,
                self.max_vertices
            );
            return None;
        }

        let start = self.vertices.len() as u32;
        for idx in &self.geometry.indices {
            self.vertices.push(self.geometry.vertices[*idx as usize]);
        }

        Some(RingGeometry {
            inner,
            outer,
            segments,
            start,
            count: count as u32,
        })
    }

    pub fn vertices(&self) -> &[RingVertex] {
        &self.vertices
    }

    /// Vertices of one ring.
    pub fn slice(&self, ring: &RingGeometry) -> &[RingVertex] {
        let start = ring.start as usize;
        let end = (start + ring.count as usize).min(self.vertices.len());
        self.vertices.get(start..end).unwrap_or(&[])
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn capacity(&self) -> usize {
        self.max_vertices
    }

    /// Raw pointer to the flat float buffer.
    pub fn buffer_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }
}

fn add_circle_polygon(builder: &mut lyon::path::path::Builder, radius: f32, segments: u32) {
    builder.begin(point(radius, 0.0));
    for i in 1..segments {
        let theta = TAU * i as f32 / segments as f32;
        builder.line_to(point(radius * theta.cos(), radius * theta.sin()));
    }
    builder.close();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;

    fn triangle_area(a: &RingVertex, b: &RingVertex, c: &RingVertex) -> f32 {
        ((b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)).abs() * 0.5
    }

    #[test]
    fn ring_vertex_is_16_bytes() {
        assert_eq!(size_of::<RingVertex>(), RingVertex::STRIDE_BYTES);
        assert_eq!(RingVertex::FLOATS, 4);
    }

    #[test]
    fn vertices_lie_in_annulus() {
        let mut rings = RingMeshes::new(4096);
        let ring = rings.add(27.0, 45.0, 128).unwrap();
        assert!(ring.count > 0);
        assert_eq!(ring.count % 3, 0);
        for v in rings.slice(&ring) {
            let r = (v.x * v.x + v.y * v.y).sqrt();
            assert!(r >= 27.0 - 1e-2 && r <= 45.0 + 1e-2, "radius {} outside annulus", r);
        }
    }

    #[test]
    fn uvs_in_unit_square() {
        let mut rings = RingMeshes::new(4096);
        let ring = rings.add(1.5, 2.5, 64).unwrap();
        for v in rings.slice(&ring) {
            assert!((0.0..=1.0).contains(&v.u));
            assert!((0.0..=1.0).contains(&v.v));
            assert!((v.u - (v.x / 2.5 + 1.0) * 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn hole_is_left_empty() {
        let segments = 64;
        let (inner, outer) = (10.0_f32, 20.0_f32);
        let mut rings = RingMeshes::new(4096);
        let ring = rings.add(inner, outer, segments).unwrap();

        let area: f32 = rings
            .slice(&ring)
            .chunks_exact(3)
            .map(|t| triangle_area(&t[0], &t[1], &t[2]))
            .sum();
        // Area of the outer polygon minus the inner one.
        let n = segments as f32;
        let expected = 0.5 * n * (TAU / n).sin() * (outer * outer - inner * inner);
        assert!((area - expected).abs() / expected < 1e-3, "area {} vs {}", area, expected);
    }

    #[test]
    fn rings_share_buffer_by_range() {
        let mut rings = RingMeshes::new(8192);
        let a = rings.add(5.0, 8.0, 32).unwrap();
        let b = rings.add(10.0, 12.0, 32).unwrap();
        assert_eq!(a.start, 0);
        assert_eq!(b.start, a.count);
        assert_eq!(rings.vertex_count() as u32, a.count + b.count);
    }

    #[test]
    fn degenerate_or_oversized_rings_rejected() {
        let mut rings = RingMeshes::new(16);
        assert!(rings.add(5.0, 5.0, 32).is_none());
        assert!(rings.add(-1.0, 5.0, 32).is_none());
        assert!(rings.add(1.0, 5.0, 2).is_none());
        // 32 segments needs far more than 16 vertices.
        assert!(rings.add(1.0, 5.0, 32).is_none());
        assert_eq!(rings.vertex_count(), 0);
    }
}
