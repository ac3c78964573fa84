//! Surface materials.
//!
//! A material is plain data shared by every primitive that uses it. The
//! integrator reads it to decide how a bounce scatters and what it emits.

use lumen_core::MaterialDescription;

use crate::Color;

/// Surface response used by the integrator.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Throughput multiplier on diffuse bounces
    pub albedo: Color,
    /// Throughput multiplier on specular bounces
    pub specular: Color,
    /// Probability in `[0, 1]` that a bounce is specular
    pub specularness: f64,
    /// Direction blend in `[0, 1]` between mirror and diffuse
    pub roughness: f64,
    /// Emitted color
    pub emissive: Color,
    /// Multiplier on `emissive`
    pub emissive_strength: f64,
}

impl Material {
    /// Absorbs everything and emits nothing.
    pub const BLACK: Material = Material {
        albedo: Color::BLACK,
        specular: Color::BLACK,
        specularness: 0.0,
        roughness: 1.0,
        emissive: Color::BLACK,
        emissive_strength: 0.0,
    };

    /// A purely diffuse material.
    pub fn diffuse(albedo: Color) -> Self {
        Self {
            albedo,
            ..Self::BLACK
        }
    }

    /// A light source that reflects nothing.
    pub fn emissive(emissive: Color, strength: f64) -> Self {
        Self {
            emissive,
            emissive_strength: strength,
            ..Self::BLACK
        }
    }

    /// Add a specular lobe.
    pub fn with_specular(mut self, specular: Color, specularness: f64, roughness: f64) -> Self {
        self.specular = specular;
        self.specularness = specularness;
        self.roughness = roughness;
        self
    }

    /// Radiance this surface adds to a path.
    #[inline]
    pub fn emitted(&self) -> Color {
        self.emissive * self.emissive_strength
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::splat(0.5))
    }
}

impl From<&MaterialDescription> for Material {
    fn from(desc: &MaterialDescription) -> Self {
        Self {
            albedo: Color::from_array(desc.albedo),
            specular: Color::from_array(desc.specular),
            specularness: desc.specularness,
            roughness: desc.roughness,
            emissive: Color::from_array(desc.emissive),
            emissive_strength: desc.emissive_strength,
        }
    }
}
