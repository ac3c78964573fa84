//! Sampling helpers over a caller-owned random source.

use lumen_math::Vec3;
use rand::{Rng, RngCore};
use std::f64::consts::TAU;

/// Uniform value in `[0, 1)`.
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Uniform value in `[-0.5, 0.5)`.
#[inline]
pub fn gen_offset(rng: &mut dyn RngCore) -> f64 {
    gen_f64(rng) - 0.5
}

/// Uniformly distributed direction on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    let z = gen_f64(rng) * 2.0 - 1.0;
    let a = gen_f64(rng) * TAU;
    let r = (1.0 - z * z).max(0.0).sqrt();
    Vec3::new(r * a.cos(), r * a.sin(), z)
}
