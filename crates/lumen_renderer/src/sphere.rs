//! Sphere primitive for ray tracing.

use std::sync::Arc;

use lumen_math::{Interval, Ray, Vec3};

use crate::{HitRecord, Material, Primitive};

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f64, material: Arc<Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

impl Primitive for Sphere {
    fn test_intersection(&self, ray: &Ray, min_dist: f64, max_dist: f64) -> HitRecord<'_> {
        let range = Interval::new(min_dist, max_dist);
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return HitRecord::miss();
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !range.surrounds(root) {
            root = (h + sqrtd) / a;
            if !range.surrounds(root) {
                return HitRecord::miss();
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        let normal = if ray.direction().dot(outward_normal) < 0.0 {
            outward_normal
        } else {
            -outward_normal
        };

        HitRecord::hit(root, normal, &self.material)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere_at(z: f64) -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, z), 0.5, Arc::new(Material::default()))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere_at(-1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.test_intersection(&ray, 0.001, f64::INFINITY);
        assert!(rec.did_hit);
        assert!((rec.distance - 0.5).abs() < 1e-9); // Should hit at t=0.5
        assert!((rec.normal - Vec3::Z).length() < 1e-9);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_at(-1.0);

        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(!sphere.test_intersection(&ray, 0.001, f64::INFINITY).did_hit);
    }

    #[test]
    fn test_inside_hit_faces_ray() {
        let sphere = unit_sphere_at(0.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.test_intersection(&ray, 0.001, f64::INFINITY);
        assert!(rec.did_hit);
        assert!((rec.distance - 0.5).abs() < 1e-9);
        assert!(rec.normal.dot(ray.direction()) < 0.0);
    }

    #[test]
    fn test_range_excludes_far_hit() {
        let sphere = unit_sphere_at(-10.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(!sphere.test_intersection(&ray, 0.001, 9.5).did_hit);
        assert!(sphere.test_intersection(&ray, 0.001, 9.6).did_hit);
    }
}
