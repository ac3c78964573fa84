//! Planar quadrilateral primitive.
//!
//! The quad is split along its `a-c` diagonal into two triangles. The line
//! through the ray is first tested against the diagonal plane to pick a
//! triangle, then against that triangle's edges with scalar triple
//! products, which yields unnormalized barycentric weights directly.

use std::sync::Arc;

use lumen_math::{Ray, Vec3};

use crate::{HitRecord, Material, Primitive};

/// Direction components smaller than this are not used to recover distance.
const MIN_AXIS_COMPONENT: f64 = 0.1;

/// A convex planar quad with corners in winding order.
#[derive(Debug, Clone)]
pub struct Quad {
    corners: [Vec3; 4],
    material: Arc<Material>,
}

impl Quad {
    /// Create a quad from four coplanar corners `a, b, c, d` in winding order.
    pub fn new(a: Vec3, b: Vec3, c: Vec3, d: Vec3, material: Arc<Material>) -> Self {
        Self {
            corners: [a, b, c, d],
            material,
        }
    }

    /// The stored corners.
    pub fn corners(&self) -> [Vec3; 4] {
        self.corners
    }

    /// Unit normal implied by the stored winding.
    pub fn winding_normal(&self) -> Vec3 {
        let [a, b, c, _] = self.corners;
        (c - a).cross(c - b).normalize()
    }
}

/// `[u, v, w] = (u x v) . w`
#[inline]
fn scalar_triple(u: Vec3, v: Vec3, w: Vec3) -> f64 {
    u.cross(v).dot(w)
}

impl Primitive for Quad {
    fn test_intersection(&self, ray: &Ray, min_dist: f64, max_dist: f64) -> HitRecord<'_> {
        // Working copies; the stored winding is never touched.
        let [mut a, mut b, mut c, mut d] = self.corners;
        let dir = ray.direction();

        let mut normal = self.winding_normal();
        if normal.dot(dir) > 0.0 {
            normal = -normal;
            std::mem::swap(&mut a, &mut d);
            std::mem::swap(&mut b, &mut c);
        }

        let p = ray.origin();
        let pq = dir;
        let pa = a - p;
        let pb = b - p;
        let pc = c - p;

        // Which side of the diagonal plane through p, c and the ray.
        let m = pc.cross(pq);
        let mut v = pa.dot(m);

        let point = if v >= 0.0 {
            // Triangle a, b, c
            let u = -pb.dot(m);
            if u < 0.0 {
                return HitRecord::miss();
            }
            let w = scalar_triple(pq, pb, pa);
            if w < 0.0 {
                return HitRecord::miss();
            }
            let sum = u + v + w;
            if sum <= 0.0 {
                return HitRecord::miss();
            }
            (u * a + v * b + w * c) / sum
        } else {
            // Triangle a, d, c
            let pd = d - p;
            let u = pd.dot(m);
            if u < 0.0 {
                return HitRecord::miss();
            }
            let w = scalar_triple(pq, pa, pd);
            if w < 0.0 {
                return HitRecord::miss();
            }
            v = -v;
            let sum = u + v + w;
            if sum <= 0.0 {
                return HitRecord::miss();
            }
            (u * a + v * d + w * c) / sum
        };

        // Back-substitute along the dominant axis to avoid dividing by ~0.
        let distance = if dir.x.abs() > MIN_AXIS_COMPONENT {
            (point.x - p.x) / dir.x
        } else if dir.y.abs() > MIN_AXIS_COMPONENT {
            (point.y - p.y) / dir.y
        } else {
            (point.z - p.z) / dir.z
        };

        if min_dist < distance && distance < max_dist {
            HitRecord::hit(distance, normal, &self.material)
        } else {
            HitRecord::miss()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_at_z(z: f64) -> Quad {
        Quad::new(
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(1.0, 1.0, z),
            Vec3::new(-1.0, 1.0, z),
            Arc::new(Material::default()),
        )
    }

    fn reversed(quad: &Quad) -> Quad {
        let [a, b, c, d] = quad.corners();
        Quad::new(d, c, b, a, quad.material.clone())
    }

    #[test]
    fn test_center_hit_either_winding() {
        let quad = square_at_z(5.0);
        let flipped = reversed(&quad);
        assert_eq!(quad.winding_normal(), -flipped.winding_normal());

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        for q in [&quad, &flipped] {
            let rec = q.test_intersection(&ray, 0.01, 1000.0);
            assert!(rec.did_hit);
            assert!((rec.distance - 5.0).abs() < 1e-9);
            assert!((rec.normal - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-9);
        }
    }

    #[test]
    fn test_normal_opposes_ray_from_behind() {
        let quad = square_at_z(5.0);
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), -Vec3::Z);
        let rec = quad.test_intersection(&ray, 0.01, 1000.0);
        assert!(rec.did_hit);
        assert!((rec.distance - 5.0).abs() < 1e-9);
        assert!((rec.normal - Vec3::Z).length() < 1e-9);
    }

    #[test]
    fn test_hits_both_triangles() {
        let quad = square_at_z(4.0);
        for target in [Vec3::new(0.5, 0.3, 4.0), Vec3::new(-0.5, -0.3, 4.0)] {
            let ray = Ray::new(Vec3::ZERO, target);
            let rec = quad.test_intersection(&ray, 0.01, 1000.0);
            assert!(rec.did_hit, "expected hit towards {:?}", target);
            assert!((rec.point(&ray) - target).length() < 1e-9);
            assert!((rec.distance - target.length()).abs() < 1e-9);
        }
    }

    #[test]
    fn test_miss_outside_edges() {
        let quad = square_at_z(4.0);
        for target in [
            Vec3::new(1.5, 0.0, 4.0),
            Vec3::new(0.0, -1.2, 4.0),
            Vec3::new(-3.0, 3.0, 4.0),
        ] {
            let ray = Ray::new(Vec3::ZERO, target);
            assert!(!quad.test_intersection(&ray, 0.01, 1000.0).did_hit);
        }
    }

    #[test]
    fn test_distance_bounds_are_exclusive() {
        let quad = square_at_z(5.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);

        assert!(!quad.test_intersection(&ray, 5.0, 1000.0).did_hit);
        assert!(!quad.test_intersection(&ray, 6.0, 1000.0).did_hit);
        assert!(!quad.test_intersection(&ray, 0.01, 5.0).did_hit);
        assert!(!quad.test_intersection(&ray, 0.01, 4.0).did_hit);
        assert!(quad.test_intersection(&ray, 4.99, 5.01).did_hit);
    }

    #[test]
    fn test_quad_behind_origin_is_missed() {
        let quad = square_at_z(-5.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let rec = quad.test_intersection(&ray, 0.01, 1000.0);
        assert!(!rec.did_hit);
        assert_eq!(rec.distance, 0.0);
    }

    #[test]
    fn test_grazing_axis_uses_dominant_component() {
        // Floor quad, ray travelling mostly along x.
        let quad = Quad::new(
            Vec3::new(-10.0, -1.0, -10.0),
            Vec3::new(10.0, -1.0, -10.0),
            Vec3::new(10.0, -1.0, 10.0),
            Vec3::new(-10.0, -1.0, 10.0),
            Arc::new(Material::default()),
        );
        let target = Vec3::new(5.0, -1.0, 0.05);
        let ray = Ray::new(Vec3::ZERO, target);
        let rec = quad.test_intersection(&ray, 0.01, 1000.0);
        assert!(rec.did_hit);
        assert!((rec.distance - target.length()).abs() < 1e-9);
        assert!((rec.normal - Vec3::Y).length() < 1e-9);
    }

    #[test]
    fn test_stored_corners_unchanged() {
        let quad = square_at_z(5.0);
        let before = quad.corners();
        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let _ = quad.test_intersection(&ray, 0.01, 1000.0);
        assert_eq!(quad.corners(), before);
    }
}
