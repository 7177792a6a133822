use crate::assets::registry::TextureRegistry;
use crate::components::entity::Entity;
use crate::components::mesh::{Material, Shape};
use crate::renderer::instance::{MeshInstance, RenderBuffer};

/// Build the render buffer from a set of entities, in iteration order.
/// Inactive, hidden and mesh-less entities are skipped. Textures are only
/// referenced once ready; until then the mesh draws with its base color.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    textures: &TextureRegistry,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    for entity in entities {
        if !entity.is_drawable() {
            continue;
        }
        let Some(mesh) = &entity.mesh else { continue };

        let (param_a, param_b, segments) = match mesh.shape {
            Shape::Sphere { radius } => (radius, 0.0, 0.0),
            Shape::Ring { inner, outer, segments } => (inner, outer, segments as f32),
        };
        let (lit, shininess, specular) = match mesh.material {
            Material::Basic => (0.0, 0.0, [0.0; 4]),
            Material::Phong { specular, shininess } => {
                (1.0, shininess, [specular.r, specular.g, specular.b, 0.0])
            }
        };
        let texture = mesh
            .texture
            .and_then(|id| textures.ready_slot(id))
            .map_or(MeshInstance::NO_TEXTURE, |slot| slot as f32);
        let flags = if mesh.double_sided { MeshInstance::FLAG_DOUBLE_SIDED } else { 0 };

        buffer.push(MeshInstance {
            model: entity.world_matrix().to_cols_array_2d(),
            color: [mesh.color.r, mesh.color.g, mesh.color.b, mesh.opacity],
            shape: mesh.shape.code(),
            param_a,
            param_b,
            segments,
            texture,
            lit,
            shininess,
            flags: flags as f32,
            specular,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::EntityId;
    use crate::components::mesh::{Color, MeshComponent};
    use glam::Vec3;

    #[test]
    fn hidden_and_bare_entities_are_skipped() {
        let mut hidden = Entity::new(EntityId(2)).with_mesh(MeshComponent::sphere(1.0, Color::WHITE));
        hidden.visible = false;
        let entities = vec![
            Entity::new(EntityId(1)),
            hidden,
            Entity::new(EntityId(3)).with_mesh(MeshComponent::sphere(2.0, Color::WHITE)),
        ];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &TextureRegistry::new(), &mut buffer);
        assert_eq!(buffer.instance_count(), 1);
        assert_eq!(buffer.instances[0].param_a, 2.0);
    }

    #[test]
    fn pending_texture_renders_untextured() {
        let mut textures = TextureRegistry::new();
        let tex = textures.register("earth", "images/earth.png");
        let entities = vec![
            Entity::new(EntityId(1))
                .with_mesh(MeshComponent::sphere(2.0, Color::WHITE).with_texture(tex)),
        ];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &textures, &mut buffer);
        assert_eq!(buffer.instances[0].texture, MeshInstance::NO_TEXTURE);

        textures.mark_ready(tex);
        build_render_buffer(entities.iter(), &textures, &mut buffer);
        assert_eq!(buffer.instance_count(), 1);
        assert_eq!(buffer.instances[0].texture, 0.0);
    }

    #[test]
    fn ring_and_material_parameters_are_written() {
        let ring = MeshComponent::ring(59.9, 60.1, 128, Color::from_hex(0x6b93d6))
            .with_opacity(0.3)
            .with_double_sided(true);
        let planet = MeshComponent::sphere(2.0, Color::WHITE).with_material(Material::Phong {
            specular: Color::from_hex(0x333333),
            shininess: 5.0,
        });
        let entities = vec![
            Entity::new(EntityId(1)).with_mesh(ring),
            Entity::new(EntityId(2)).with_pos(Vec3::new(60.0, 0.0, 0.0)).with_mesh(planet),
        ];
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &TextureRegistry::new(), &mut buffer);

        let r = &buffer.instances[0];
        assert_eq!((r.shape, r.param_a, r.param_b, r.segments), (1.0, 59.9, 60.1, 128.0));
        assert_eq!(r.color[3], 0.3);
        assert_eq!(r.flags, 1.0);
        assert_eq!(r.lit, 0.0);

        let p = &buffer.instances[1];
        assert_eq!((p.lit, p.shininess), (1.0, 5.0));
        assert_eq!(p.model[3][0], 60.0);
    }
}
