//! Scene description types for Lumen.
//!
//! A scene file names a set of materials and lists the primitives that
//! reference them. The description is renderer-agnostic; the renderer
//! turns it into intersectable primitives.

use std::collections::HashSet;
use std::path::Path;

use lumen_math::Vec3;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    #[error("Duplicate material: {0}")]
    DuplicateMaterial(String),

    #[error("Invalid geometry for primitive {index}: {reason}")]
    InvalidGeometry { index: usize, reason: String },
}

/// Result type for scene loading.
pub type SceneResult<T> = Result<T, SceneError>;

/// Surface response of a material, as written in a scene file.
///
/// Colors are linear RGB in `[0, 1]`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MaterialDescription {
    /// Name primitives use to reference this material
    pub name: String,

    /// Diffuse reflectance
    #[serde(default)]
    pub albedo: [f64; 3],

    /// Tint applied on specular bounces
    #[serde(default)]
    pub specular: [f64; 3],

    /// Probability that a bounce is specular
    #[serde(default)]
    pub specularness: f64,

    /// Blend between mirror (0) and diffuse (1) bounce directions
    #[serde(default = "default_roughness")]
    pub roughness: f64,

    /// Emitted color
    #[serde(default)]
    pub emissive: [f64; 3],

    /// Multiplier on the emitted color
    #[serde(default)]
    pub emissive_strength: f64,
}

fn default_roughness() -> f64 {
    1.0
}

impl MaterialDescription {
    /// A purely diffuse material.
    pub fn diffuse(name: impl Into<String>, albedo: [f64; 3]) -> Self {
        Self {
            name: name.into(),
            albedo,
            specular: [0.0; 3],
            specularness: 0.0,
            roughness: default_roughness(),
            emissive: [0.0; 3],
            emissive_strength: 0.0,
        }
    }

    /// A black surface that only emits light.
    pub fn light(name: impl Into<String>, emissive: [f64; 3], strength: f64) -> Self {
        Self {
            emissive,
            emissive_strength: strength,
            ..Self::diffuse(name, [0.0; 3])
        }
    }

    /// Add a specular lobe to the material.
    pub fn with_specular(mut self, specular: [f64; 3], specularness: f64, roughness: f64) -> Self {
        self.specular = specular;
        self.specularness = specularness;
        self.roughness = roughness;
        self
    }

    /// Check if this material emits light.
    pub fn is_emissive(&self) -> bool {
        self.emissive_strength > 0.0 && self.emissive.iter().any(|c| *c > 0.0)
    }
}

/// A primitive shape referencing a material by name.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrimitiveDescription {
    /// Planar quadrilateral, corners in winding order
    Quad {
        corners: [[f64; 3]; 4],
        material: String,
    },
    /// Sphere
    Sphere {
        center: [f64; 3],
        radius: f64,
        material: String,
    },
}

impl PrimitiveDescription {
    /// Name of the material this primitive uses.
    pub fn material(&self) -> &str {
        match self {
            PrimitiveDescription::Quad { material, .. } => material,
            PrimitiveDescription::Sphere { material, .. } => material,
        }
    }
}

/// A complete scene: materials and the primitives that use them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub materials: Vec<MaterialDescription>,

    #[serde(default)]
    pub primitives: Vec<PrimitiveDescription>,
}

impl SceneDescription {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a scene from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let scene = Self::from_json(&contents)?;
        log::info!(
            "Loaded scene {} ({} materials, {} primitives)",
            path.display(),
            scene.materials.len(),
            scene.primitives.len()
        );
        Ok(scene)
    }

    /// Parse and validate a scene from a JSON string.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Add a material.
    pub fn add_material(&mut self, material: MaterialDescription) {
        self.materials.push(material);
    }

    /// Add a quad with corners in winding order.
    pub fn add_quad(&mut self, corners: [[f64; 3]; 4], material: impl Into<String>) {
        self.primitives.push(PrimitiveDescription::Quad {
            corners,
            material: material.into(),
        });
    }

    /// Add a sphere.
    pub fn add_sphere(&mut self, center: [f64; 3], radius: f64, material: impl Into<String>) {
        self.primitives.push(PrimitiveDescription::Sphere {
            center,
            radius,
            material: material.into(),
        });
    }

    /// Look up a material by name.
    pub fn material(&self, name: &str) -> Option<&MaterialDescription> {
        self.materials.iter().find(|m| m.name == name)
    }

    /// Check material names and primitive geometry.
    pub fn validate(&self) -> SceneResult<()> {
        let mut names = HashSet::new();
        for material in &self.materials {
            if !names.insert(material.name.as_str()) {
                return Err(SceneError::DuplicateMaterial(material.name.clone()));
            }
        }

        for (index, primitive) in self.primitives.iter().enumerate() {
            if !names.contains(primitive.material()) {
                return Err(SceneError::UnknownMaterial(primitive.material().to_string()));
            }
            match primitive {
                PrimitiveDescription::Quad { corners, .. } => {
                    let [a, b, c, _] = corners.map(Vec3::from_array);
                    if (c - a).cross(c - b).length_squared() < 1e-12 {
                        return Err(SceneError::InvalidGeometry {
                            index,
                            reason: "quad corners are collinear".to_string(),
                        });
                    }
                }
                PrimitiveDescription::Sphere { radius, .. } => {
                    if !(*radius > 0.0) {
                        return Err(SceneError::InvalidGeometry {
                            index,
                            reason: format!("sphere radius {} is not positive", radius),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
