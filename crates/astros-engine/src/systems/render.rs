use crate::assets::registry::TextureRegistry;
use crate::components::entity::Entity;
use crate::components::mesh::{MeshComponent, MeshShape};
use crate::renderer::instance::{BodyInstance, RenderBuffer};

/// Build the render buffer from a set of entities.
/// Opaque bodies go first, transparent bodies after; `transparent_split`
/// marks the boundary. A texture index is only written once the registry
/// reports the texture ready.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    textures: &TextureRegistry,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    let mut opaque: Vec<BodyInstance> = Vec::new();
    let mut transparent: Vec<BodyInstance> = Vec::new();

    for entity in entities {
        if !entity.active {
            continue;
        }

        let mesh = match &entity.mesh {
            Some(m) => m,
            None => continue,
        };

        let instance = body_instance(entity, mesh, textures);
        if mesh.material.transparent {
            transparent.push(instance);
        } else {
            opaque.push(instance);
        }
    }

    let split = opaque.len() as u32;
    let mut dropped = 0usize;

    for inst in opaque {
        if !buffer.push(inst) {
            dropped += 1;
        }
    }
    buffer.set_transparent_split(split.min(buffer.instance_count()));
    for inst in transparent {
        if !buffer.push(inst) {
            dropped += 1;
        }
    }

    if dropped > 0 {
        log::warn!("render: {} bodies over capacity {}", dropped, buffer.capacity());
    }
}

fn body_instance(entity: &Entity, mesh: &MeshComponent, textures: &TextureRegistry) -> BodyInstance {
    let texture = match mesh.material.texture {
        Some(id) if textures.is_ready(id) => id.0 as f32,
        _ => BodyInstance::NO_TEXTURE,
    };
    let (param0, param1) = match mesh.shape {
        MeshShape::Sphere { radius, segments } => (radius, segments as f32),
        MeshShape::Ring(ring) => (ring.start as f32, ring.count as f32),
    };
    let color = mesh.material.color;

    BodyInstance {
        x: entity.pos.x,
        y: entity.pos.y,
        z: entity.pos.z,
        scale: entity.scale.max_element(),
        qx: entity.rotation.x,
        qy: entity.rotation.y,
        qz: entity.rotation.z,
        qw: entity.rotation.w,
        r: color.r,
        g: color.g,
        b: color.b,
        texture,
        shape_kind: mesh.shape.kind(),
        param0,
        param1,
        flags: mesh.material.flags() as f32,
    }
}
