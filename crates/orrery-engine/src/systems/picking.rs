/// Ray picking against scene meshes.
///
/// Spheres are tested analytically; rings and transform-only entities are
/// never pick targets. Only front faces count, so a ray starting inside a
/// sphere does not hit it.

use glam::Vec3;
use crate::api::types::EntityId;
use crate::core::scene::Scene;

/// Half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray to the entry point of a sphere, if any.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        if self.direction == Vec3::ZERO || radius <= 0.0 {
            return None;
        }
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.length_squared() - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let t = -b - disc.sqrt();
        if t >= 0.0 {
            Some(t)
        } else {
            None
        }
    }
}

/// Result of a successful pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub id: EntityId,
    pub distance: f32,
    pub point: Vec3,
}

/// Test `candidates` in order and return the nearest hit.
/// Ties keep the earlier candidate.
pub fn pick_nearest(scene: &Scene, candidates: &[EntityId], ray: &Ray) -> Option<Hit> {
    let mut best: Option<Hit> = None;
    for &id in candidates {
        let Some(entity) = scene.get(id) else { continue };
        if !entity.active {
            continue;
        }
        let Some(radius) = entity.mesh.as_ref().and_then(|m| m.sphere_radius()) else {
            continue;
        };
        let world_radius = radius * entity.scale.max_element();
        let Some(t) = ray.intersect_sphere(entity.pos, world_radius) else {
            continue;
        };
        if best.map_or(true, |b| t < b.distance) {
            best = Some(Hit { id, distance: t, point: ray.at(t) });
        }
    }
    best
}
