/// One-shot scene construction: sun, lights, and a pivot, mesh and orbit
/// ring per planet.

use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use orrery_engine::*;
use serde_json::json;

use crate::bodies::{self, PlanetDescriptor, PlanetTable};
use crate::config::SolarConfig;

pub const AMBIENT_COLOR: u32 = 0x404040;
pub const SUN_LIGHT_INTENSITY: f32 = 2.0;
pub const SUN_LIGHT_RANGE: f32 = 300.0;
pub const INITIAL_EYE: Vec3 = Vec3::new(0.0, 100.0, 200.0);

/// Everything the scene knows about one planet. Index `i` in
/// `SolarScene::bodies` is planet `i` of the table.
#[derive(Debug, Clone)]
pub struct Body {
    pub descriptor: PlanetDescriptor,
    /// Invisible parent whose Y rotation is the revolution.
    pub pivot: EntityId,
    /// Textured sphere, offset from the pivot by the orbit distance along +X.
    pub mesh: EntityId,
    pub ring: EntityId,
    pub texture: TextureId,
    /// Screen label, refreshed every tick.
    pub label: LabelInstance,
}

#[derive(Debug)]
pub struct SolarScene {
    pub sun: EntityId,
    pub sun_texture: TextureId,
    pub bodies: Vec<Body>,
    pub graph: TransformGraph,
}

impl SolarScene {
    /// Planet meshes in table order. Pick candidates.
    pub fn mesh_ids(&self) -> Vec<EntityId> {
        self.bodies.iter().map(|b| b.mesh).collect()
    }

    pub fn ring_ids(&self) -> Vec<EntityId> {
        self.bodies.iter().map(|b| b.ring).collect()
    }

    /// Index of the body owning `mesh`.
    pub fn body_index(&self, mesh: EntityId) -> Option<usize> {
        self.bodies.iter().position(|b| b.mesh == mesh)
    }

    /// Static scene description for the host UI: one label element and one
    /// follow-target option per planet, in table order.
    pub fn describe(&self) -> serde_json::Value {
        let planets: Vec<_> = self
            .bodies
            .iter()
            .enumerate()
            .map(|(index, body)| {
                let d = &body.descriptor;
                json!({
                    "index": index,
                    "name": d.name,
                    "color": bodies::hex_string(d.color),
                    "texture": d.texture,
                    "textureSlot": body.texture.0,
                })
            })
            .collect();
        json!({
            "sun": {
                "name": bodies::SUN_NAME,
                "texture": bodies::SUN_TEXTURE,
                "textureSlot": self.sun_texture.0,
            },
            "planets": planets,
        })
    }
}

/// Build the static scene. Nothing is added or removed afterwards.
pub fn build(ctx: &mut EngineContext, table: &PlanetTable, config: &SolarConfig) -> SolarScene {
    // ── Lights ───────────────────────────────────────────────────────
    ctx.lights.set_ambient(Color::from_hex(AMBIENT_COLOR));
    ctx.lights.add(PointLight::new(Vec3::ZERO, Color::WHITE, SUN_LIGHT_INTENSITY, SUN_LIGHT_RANGE));

    // ── Sun ──────────────────────────────────────────────────────────
    let sun_texture = ctx.textures.register(bodies::SUN_NAME, bodies::SUN_TEXTURE);
    let sun = ctx.next_id();
    ctx.scene.spawn(
        Entity::new(sun)
            .with_tag("sun")
            .with_mesh(MeshComponent::sphere(bodies::SUN_RADIUS, Color::WHITE).with_texture(sun_texture)),
    );

    // ── Planets ──────────────────────────────────────────────────────
    let mut graph = TransformGraph::new();
    let planet_material = Material::Phong {
        specular: Color::from_hex(bodies::PLANET_SPECULAR),
        shininess: bodies::PLANET_SHININESS,
    };

    let mut planets = Vec::with_capacity(table.len());
    for (index, descriptor) in table.iter().enumerate() {
        let color = Color::from_hex(descriptor.color);
        let distance = descriptor.distance as f32;
        let texture = ctx.textures.register(descriptor.name.as_str(), descriptor.texture.as_str());

        let pivot = ctx.next_id();
        ctx.scene.spawn(Entity::new(pivot).with_tag(format!("pivot:{}", descriptor.name)));
        graph.register(pivot);

        let mesh = ctx.next_id();
        ctx.scene.spawn(
            Entity::new(mesh).with_tag(descriptor.name.as_str()).with_mesh(
                MeshComponent::sphere(descriptor.radius as f32, color)
                    .with_material(planet_material)
                    .with_texture(texture),
            ),
        );
        graph.register_with(mesh, LocalTransform::new().with_offset(Vec3::X * distance));
        graph.set_parent(mesh, Some(pivot));

        let ring = ctx.next_id();
        let inner = (distance - config.ring_half_width).max(0.0);
        let outer = distance + config.ring_half_width;
        ctx.scene.spawn(
            Entity::new(ring)
                .with_tag(format!("ring:{}", descriptor.name))
                .with_rotation(Quat::from_rotation_x(FRAC_PI_2))
                .with_mesh(
                    MeshComponent::ring(inner, outer, config.ring_segments, color)
                        .with_opacity(config.ring_opacity)
                        .with_double_sided(true),
                ),
        );

        planets.push(Body {
            descriptor: descriptor.clone(),
            pivot,
            mesh,
            ring,
            texture,
            label: LabelInstance { index: index as f32, ..Default::default() },
        });
    }

    graph.propagate(&mut ctx.scene);

    ctx.camera.look_at(INITIAL_EYE, Vec3::ZERO);

    log::info!(
        "scene built: {} planets, {} entities, {} textures",
        planets.len(),
        ctx.scene.len(),
        ctx.textures.len()
    );

    SolarScene { sun, sun_texture, bodies: planets, graph }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn built() -> (EngineContext, SolarScene) {
        let mut ctx = EngineContext::new();
        let table = PlanetTable::builtin().unwrap();
        let scene = build(&mut ctx, &table, &SolarConfig::default());
        (ctx, scene)
    }

    #[test]
    fn one_body_per_planet_in_order() {
        let (_, scene) = built();
        assert_eq!(scene.bodies.len(), 8);
        assert_eq!(scene.bodies[0].descriptor.name, "Mercury");
        assert_eq!(scene.bodies[7].descriptor.name, "Neptune");
        for (i, body) in scene.bodies.iter().enumerate() {
            assert_eq!(body.label.index, i as f32);
        }
    }

    #[test]
    fn sun_plus_three_entities_per_planet() {
        let (ctx, _) = built();
        assert_eq!(ctx.scene.len(), 1 + 3 * 8);
        let sun = ctx.scene.find_by_tag("sun").unwrap();
        let mesh = sun.mesh.unwrap();
        assert_eq!(mesh.sphere_radius(), Some(10.0));
        assert_eq!(mesh.material, Material::Basic);
    }

    #[test]
    fn meshes_start_on_plus_x_at_orbit_distance() {
        let (ctx, scene) = built();
        let earth = &scene.bodies[2];
        let pos = ctx.scene.get(earth.mesh).unwrap().pos;
        assert!((pos - Vec3::new(60.0, 0.0, 0.0)).length() < 1e-5);
        assert_eq!(scene.graph.get_parent(earth.mesh), Some(earth.pivot));
        assert_eq!(scene.graph.get_local(earth.pivot).unwrap().rotation, Quat::IDENTITY);
    }

    #[test]
    fn planet_material_is_phong() {
        let (ctx, scene) = built();
        let mesh = ctx.scene.get(scene.bodies[4].mesh).unwrap().mesh.unwrap();
        assert_eq!(
            mesh.material,
            Material::Phong { specular: Color::from_hex(0x333333), shininess: 5.0 }
        );
        assert_eq!(mesh.sphere_radius(), Some(4.0));
        assert_eq!(mesh.texture, Some(scene.bodies[4].texture));
    }

    #[test]
    fn rings_lie_flat_around_orbit() {
        let (ctx, scene) = built();
        let ring = ctx.scene.get(scene.bodies[0].ring).unwrap();
        let mesh = ring.mesh.unwrap();
        match mesh.shape {
            Shape::Ring { inner, outer, segments } => {
                assert!((inner - 29.9).abs() < 1e-4);
                assert!((outer - 30.1).abs() < 1e-4);
                assert_eq!(segments, 128);
            }
            other => panic!("expected ring, got {other:?}"),
        }
        assert!((mesh.opacity - 0.3).abs() < 1e-6);
        assert!(mesh.double_sided);
        assert_eq!(mesh.color, Color::from_hex(0x8c7c6d));
        // Local +Y of the ring maps onto world +Z: the ring sits in the XZ plane.
        let normal = ring.rotation * Vec3::Z;
        assert!((normal - Vec3::NEG_Y).length() < 1e-5);
    }

    #[test]
    fn nine_textures_registered_pending() {
        let (ctx, scene) = built();
        assert_eq!(ctx.textures.len(), 9);
        assert_eq!(ctx.textures.state(scene.sun_texture), Some(LoadState::Pending));
        let manifest = ctx.textures.manifest();
        assert_eq!(manifest.textures[0].path, "images/sun.png");
        assert_eq!(manifest.textures[3].path, "images/earth.png");
    }

    #[test]
    fn lights_and_camera() {
        let (ctx, _) = built();
        assert_eq!(ctx.lights.count(), 1);
        assert_eq!(ctx.lights.ambient(), Color::from_hex(0x404040));
        let light = ctx.lights.iter().next().unwrap();
        assert_eq!(light.intensity, 2.0);
        assert_eq!(light.range, 300.0);
        assert_eq!(ctx.camera.position, INITIAL_EYE);
        assert_eq!(ctx.camera.target, Vec3::ZERO);
    }

    #[test]
    fn description_lists_planets() {
        let (_, scene) = built();
        let desc = scene.describe();
        let planets = desc["planets"].as_array().unwrap();
        assert_eq!(planets.len(), 8);
        assert_eq!(planets[2]["name"], "Earth");
        assert_eq!(planets[2]["color"], "#6b93d6");
        assert_eq!(planets[2]["texture"], "images/earth.png");
        assert_eq!(desc["sun"]["texture"], "images/sun.png");
    }
}
