//! Light transport along a single camera path.
//!
//! Each bounce finds the closest hit, nudges the ray off the surface, picks
//! a specular or diffuse bounce from the material's specularness, and
//! accumulates emitted light weighted by the path throughput. Paths end
//! on a miss or after `max_bounces`; there is no Russian roulette.

use lumen_math::{Interval, Ray, Vec3};
use rand::RngCore;

use crate::random::{gen_f64, random_unit_vector};
use crate::{Color, Scene};

/// Offset along the normal applied to every bounce origin.
pub const RAY_NUDGE: f64 = 0.01;

/// Fixed per-render parameters of the integrator.
#[derive(Debug, Clone, Copy)]
pub struct TraceParams {
    /// Lower bound on accepted hit distances
    pub min_ray_distance: f64,
    /// Hits at or beyond this are misses
    pub max_ray_distance: f64,
    /// Hard cap on the number of bounces
    pub max_bounces: u32,
}

impl TraceParams {
    fn range(&self) -> Interval {
        Interval::new(self.min_ray_distance, self.max_ray_distance)
    }
}

/// Reflect `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Cosine-weighted direction in the hemisphere around `normal`.
pub fn diffuse_direction(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let direction = normal + random_unit_vector(rng);

    // Catch degenerate scatter direction
    if direction.length_squared() < 1e-12 {
        normal
    } else {
        direction.normalize()
    }
}

/// Trace one camera ray and return the radiance it carries back.
pub fn trace_pixel(mut ray: Ray, scene: &Scene, params: &TraceParams, rng: &mut dyn RngCore) -> Color {
    let mut color = Color::BLACK;
    let mut throughput = Color::WHITE;
    let range = params.range();

    for _ in 0..params.max_bounces {
        let hit = scene.closest_hit(&ray, range);
        if !hit.did_hit {
            break;
        }

        let material = hit.material;
        ray.origin = hit.point(&ray) + hit.normal * RAY_NUDGE;

        let use_specular = gen_f64(rng) < material.specularness;

        // Both branches travel along the roughness blend; the branch only
        // picks which color attenuates the path.
        let diffuse = diffuse_direction(hit.normal, rng);
        let specular = reflect(ray.direction(), hit.normal);
        let roughness_sq = material.roughness * material.roughness;
        ray.set_direction(specular.lerp(diffuse, roughness_sq));

        color += material.emitted() * throughput;

        throughput *= if use_specular {
            material.specular
        } else {
            material.albedo
        };
    }

    color
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Quad, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    const PARAMS: TraceParams = TraceParams {
        min_ray_distance: 0.001,
        max_ray_distance: 10000.0,
        max_bounces: 8,
    };

    fn big_wall(z: f64, material: Arc<Material>) -> Quad {
        Quad::new(
            Vec3::new(-100.0, -100.0, z),
            Vec3::new(100.0, -100.0, z),
            Vec3::new(100.0, 100.0, z),
            Vec3::new(-100.0, 100.0, z),
            material,
        )
    }

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_diffuse_direction_in_hemisphere() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..1000 {
            let d = diffuse_direction(Vec3::Y, &mut rng);
            assert!(d.y >= -1e-9);
            assert!((d.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_empty_scene_is_black() {
        let mut rng = StdRng::seed_from_u64(1);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(trace_pixel(ray, &Scene::new(), &PARAMS, &mut rng), Color::BLACK);
    }

    #[test]
    fn test_black_material_returns_black() {
        let mut scene = Scene::new();
        scene.add(big_wall(5.0, Arc::new(Material::BLACK)));
        scene.add(big_wall(-5.0, Arc::new(Material::BLACK)));

        let mut rng = StdRng::seed_from_u64(2);
        for bounces in [1, 2, 8, 32] {
            let params = TraceParams {
                max_bounces: bounces,
                ..PARAMS
            };
            for _ in 0..64 {
                let ray = Ray::new(Vec3::ZERO, Vec3::new(0.1, -0.2, 1.0));
                assert_eq!(trace_pixel(ray, &scene, &params, &mut rng), Color::BLACK);
            }
        }
    }

    #[test]
    fn test_single_bounce_sees_emission_only() {
        let emissive = Color::new(1.0, 0.5, 0.25);
        let mut scene = Scene::new();
        let lamp = Material::emissive(emissive, 3.0).with_specular(Color::WHITE, 0.5, 0.5);
        scene.add(big_wall(5.0, Arc::new(lamp)));

        let params = TraceParams {
            max_bounces: 1,
            ..PARAMS
        };
        let mut rng = StdRng::seed_from_u64(3);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, 0.2, 1.0));
        let color = trace_pixel(ray, &scene, &params, &mut rng);
        assert!(color.max_difference(emissive * 3.0) < 1e-12);
    }

    #[test]
    fn test_mirror_bounce_carries_specular_tint() {
        // Mirror floor under an emitter: the second bounce sees the lamp
        // through the mirror, tinted by the specular color.
        let tint = Color::new(0.5, 0.25, 1.0);
        let mirror = Material::BLACK.with_specular(tint, 1.0, 0.0);
        let lamp = Material::emissive(Color::WHITE, 2.0);

        let mut scene = Scene::new();
        scene.add(big_wall(5.0, Arc::new(mirror)));
        scene.add(big_wall(-5.0, Arc::new(lamp)));

        let params = TraceParams {
            max_bounces: 2,
            ..PARAMS
        };
        let mut rng = StdRng::seed_from_u64(4);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let color = trace_pixel(ray, &scene, &params, &mut rng);
        assert!(color.max_difference(tint * 2.0) < 1e-12);
    }

    #[test]
    fn test_enclosed_diffuse_light_accumulates() {
        // Inside an emissive, half-reflective sphere every bounce hits and
        // adds emission: 1 + 0.5 + 0.25.
        let mut scene = Scene::new();
        let shell = Material {
            albedo: Color::splat(0.5),
            ..Material::emissive(Color::WHITE, 1.0)
        };
        scene.add(Sphere::new(Vec3::ZERO, 10.0, Arc::new(shell)));

        let params = TraceParams {
            max_bounces: 3,
            ..PARAMS
        };
        let mut rng = StdRng::seed_from_u64(5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.2, 0.4, 1.0));
        let color = trace_pixel(ray, &scene, &params, &mut rng);
        assert!(color.max_difference(Color::splat(1.75)) < 1e-12);
    }
}
