//! Primitive trait and HitRecord for ray-primitive intersection.

use lumen_math::{Ray, Vec3};

use crate::Material;

/// Material reported by records that did not hit anything.
static NO_MATERIAL: Material = Material::BLACK;

/// Result of testing a ray against a primitive.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Whether the ray hit the primitive within the requested range
    pub did_hit: bool,
    /// Distance along the ray to the hit point
    pub distance: f64,
    /// Unit surface normal, always facing against the ray
    pub normal: Vec3,
    /// Material of the primitive that was hit
    pub material: &'a Material,
}

impl<'a> Default for HitRecord<'a> {
    fn default() -> Self {
        Self {
            did_hit: false,
            distance: 0.0,
            normal: Vec3::ZERO,
            material: &NO_MATERIAL,
        }
    }
}

impl<'a> HitRecord<'a> {
    /// A record for a hit at `distance`.
    pub fn hit(distance: f64, normal: Vec3, material: &'a Material) -> Self {
        Self {
            did_hit: true,
            distance,
            normal,
            material,
        }
    }

    /// The record returned when nothing was hit.
    pub fn miss() -> Self {
        Self::default()
    }

    /// World-space hit point on `ray`.
    pub fn point(&self, ray: &Ray) -> Vec3 {
        ray.at(self.distance)
    }
}

/// Something a ray can hit.
///
/// Implementations must not keep per-call scratch state: the same instance
/// is tested concurrently from every worker thread.
pub trait Primitive: Send + Sync {
    /// Test `ray` against this primitive.
    ///
    /// Returns a hit only when `min_dist < distance < max_dist`; otherwise
    /// the default, non-hit record.
    fn test_intersection(&self, ray: &Ray, min_dist: f64, max_dist: f64) -> HitRecord<'_>;
}
