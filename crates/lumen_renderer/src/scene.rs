//! The collection of primitives a render traces against.

use std::collections::HashMap;
use std::sync::Arc;

use lumen_core::{PrimitiveDescription, SceneDescription, SceneError};
use lumen_math::{Interval, Ray, Vec3};

use crate::{HitRecord, Material, Primitive, Quad, Sphere};

/// Primitives in insertion order. Intersection is an exhaustive scan.
#[derive(Default)]
pub struct Scene {
    primitives: Vec<Box<dyn Primitive>>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiate every primitive of a scene description.
    ///
    /// Primitives naming the same material share one `Arc<Material>`.
    pub fn from_description(desc: &SceneDescription) -> Result<Self, SceneError> {
        desc.validate()?;

        let materials: HashMap<&str, Arc<Material>> = desc
            .materials
            .iter()
            .map(|m| (m.name.as_str(), Arc::new(Material::from(m))))
            .collect();

        let mut scene = Scene::new();
        for primitive in &desc.primitives {
            let material = materials
                .get(primitive.material())
                .cloned()
                .ok_or_else(|| SceneError::UnknownMaterial(primitive.material().to_string()))?;

            match primitive {
                PrimitiveDescription::Quad { corners, .. } => {
                    let [a, b, c, d] = corners.map(Vec3::from_array);
                    scene.add(Quad::new(a, b, c, d, material));
                }
                PrimitiveDescription::Sphere { center, radius, .. } => {
                    scene.add(Sphere::new(Vec3::from_array(*center), *radius, material));
                }
            }
        }
        Ok(scene)
    }

    /// Append a primitive.
    pub fn add(&mut self, primitive: impl Primitive + 'static) {
        self.primitives.push(Box::new(primitive));
    }

    /// Move every primitive of `other` to the end of this scene.
    pub fn append(&mut self, mut other: Scene) {
        self.primitives.append(&mut other.primitives);
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Closest hit strictly inside `range`.
    ///
    /// `range.max` doubles as the "nothing hit yet" distance; each hit
    /// narrows the range for the primitives after it.
    pub fn closest_hit(&self, ray: &Ray, range: Interval) -> HitRecord<'_> {
        let mut closest = HitRecord::miss();
        let mut closest_so_far = range.max;

        for primitive in &self.primitives {
            let rec = primitive.test_intersection(ray, range.min, closest_so_far);
            if rec.did_hit && rec.distance < closest_so_far {
                closest_so_far = rec.distance;
                closest = rec;
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;
    use lumen_core::MaterialDescription;

    fn wall(z: f64, material: Arc<Material>) -> Quad {
        Quad::new(
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(1.0, 1.0, z),
            Vec3::new(-1.0, 1.0, z),
            material,
        )
    }

    #[test]
    fn test_append_keeps_both_scenes() {
        let mat = Arc::new(Material::default());
        let mut scene = Scene::new();
        scene.add(wall(4.0, mat.clone()));

        let mut other = Scene::new();
        other.add(wall(2.0, mat.clone()));
        other.add(wall(6.0, mat));
        scene.append(other);

        assert_eq!(scene.len(), 3);
        let rec = scene.closest_hit(&Ray::new(Vec3::ZERO, Vec3::Z), Interval::new(0.01, 1000.0));
        assert!((rec.distance - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_closest_hit_wins_regardless_of_order() {
        let near = Arc::new(Material::diffuse(Color::new(1.0, 0.0, 0.0)));
        let far = Arc::new(Material::diffuse(Color::new(0.0, 0.0, 1.0)));

        let mut scene = Scene::new();
        scene.add(wall(8.0, far.clone()));
        scene.add(wall(3.0, near.clone()));
        scene.add(wall(5.0, far));

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let rec = scene.closest_hit(&ray, Interval::new(0.01, 1000.0));
        assert!(rec.did_hit);
        assert!((rec.distance - 3.0).abs() < 1e-9);
        assert_eq!(*rec.material, *near);
    }

    #[test]
    fn test_nothing_under_max_is_a_miss() {
        let mut scene = Scene::new();
        scene.add(wall(50.0, Arc::new(Material::default())));

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        assert!(!scene.closest_hit(&ray, Interval::new(0.01, 20.0)).did_hit);
        assert!(!Scene::new().closest_hit(&ray, Interval::new(0.01, 20.0)).did_hit);
    }

    #[test]
    fn test_from_description_shares_materials() {
        let mut desc = SceneDescription::new();
        desc.add_material(MaterialDescription::diffuse("white", [0.7; 3]));
        desc.add_material(MaterialDescription::light("lamp", [1.0; 3], 5.0));
        desc.add_quad(
            [[-1.0, -1.0, 5.0], [1.0, -1.0, 5.0], [1.0, 1.0, 5.0], [-1.0, 1.0, 5.0]],
            "lamp",
        );
        desc.add_sphere([0.0, 0.0, 3.0], 0.5, "white");

        let scene = Scene::from_description(&desc).unwrap();
        assert_eq!(scene.len(), 2);

        let ray = Ray::new(Vec3::ZERO, Vec3::Z);
        let rec = scene.closest_hit(&ray, Interval::new(0.01, 1000.0));
        assert!((rec.distance - 2.5).abs() < 1e-9);
        assert_eq!(rec.material.albedo, Color::splat(0.7));
    }

    #[test]
    fn test_from_description_rejects_unknown_material() {
        let mut desc = SceneDescription::new();
        desc.add_sphere([0.0, 0.0, 3.0], 0.5, "missing");
        assert!(Scene::from_description(&desc).is_err());
    }
}
