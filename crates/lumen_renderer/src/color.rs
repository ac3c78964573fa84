//! Linear RGB color and display transforms.

use std::ops::{Add, AddAssign, Mul, MulAssign};

use lumen_math::{Interval, Vec3};

/// Gamma used when encoding linear radiance for display.
pub const DISPLAY_GAMMA: f64 = 2.2;

/// Linear RGB triple.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Color(pub Vec3);

impl Color {
    pub const BLACK: Color = Color(Vec3::ZERO);
    pub const WHITE: Color = Color(Vec3::ONE);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Color(Vec3::new(r, g, b))
    }

    #[inline]
    pub const fn splat(v: f64) -> Self {
        Color(Vec3::splat(v))
    }

    /// Build from an `[r, g, b]` array.
    #[inline]
    pub fn from_array(rgb: [f64; 3]) -> Self {
        Color(Vec3::from_array(rgb))
    }

    #[inline]
    pub fn r(&self) -> f64 {
        self.0.x
    }

    #[inline]
    pub fn g(&self) -> f64 {
        self.0.y
    }

    #[inline]
    pub fn b(&self) -> f64 {
        self.0.z
    }

    /// Linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
    #[inline]
    pub fn mix(self, other: Color, t: f64) -> Color {
        Color(self.0.lerp(other.0, t))
    }

    /// Largest absolute component difference.
    pub fn max_difference(self, other: Color) -> f64 {
        (self.0 - other.0).abs().max_element()
    }

    /// Scale by the exposure multiplier.
    #[inline]
    pub fn exposed(self, exposure: f64) -> Color {
        self * exposure
    }

    /// ACES filmic tone curve (Narkowicz fit), clamped to `[0, 1]`.
    pub fn tone_mapped(self) -> Color {
        const A: f64 = 2.51;
        const B: f64 = 0.03;
        const C: f64 = 2.43;
        const D: f64 = 0.59;
        const E: f64 = 0.14;
        // Past this the curve is flat at the clamp; keeps x * x finite.
        const MAX_INPUT: f64 = 1e12;
        let x = self.0.clamp(Vec3::ZERO, Vec3::splat(MAX_INPUT));
        let mapped = (x * (A * x + B)) / (x * (C * x + D) + E);
        Color(mapped.clamp(Vec3::ZERO, Vec3::ONE))
    }

    /// Encode linear values with the display gamma.
    pub fn gamma_corrected(self) -> Color {
        let inv = 1.0 / DISPLAY_GAMMA;
        Color(Vec3::new(
            linear_to_gamma(self.0.x, inv),
            linear_to_gamma(self.0.y, inv),
            linear_to_gamma(self.0.z, inv),
        ))
    }

    /// Convert to 8-bit RGB, clamping to the displayable range.
    pub fn to_rgb8(self) -> [u8; 3] {
        let quantize = |c: f64| (255.0 * Interval::UNIT.clamp(c)).round() as u8;
        [quantize(self.0.x), quantize(self.0.y), quantize(self.0.z)]
    }
}

#[inline]
fn linear_to_gamma(linear: f64, inv_gamma: f64) -> f64 {
    if linear > 0.0 {
        linear.powf(inv_gamma)
    } else {
        0.0
    }
}

impl From<Vec3> for Color {
    fn from(v: Vec3) -> Self {
        Color(v)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color(self.0 + rhs.0)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        self.0 += rhs.0;
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color(self.0 * rhs.0)
    }
}

impl MulAssign for Color {
    fn mul_assign(&mut self, rhs: Color) {
        self.0 *= rhs.0;
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Color {
        Color(self.0 * rhs)
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color(rhs.0 * self)
    }
}
