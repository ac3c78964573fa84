//! Display transform applied when rows are flushed to the output image.

use crate::Color;

/// Exposure, then ACES tone mapping, then gamma.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostProcess {
    pub exposure: f64,
}

impl PostProcess {
    pub fn new(exposure: f64) -> Self {
        Self { exposure }
    }

    /// Map linear radiance to a display value in `[0, 1]`.
    #[inline]
    pub fn apply(&self, color: Color) -> Color {
        color.exposed(self.exposure).tone_mapped().gamma_corrected()
    }
}

impl Default for PostProcess {
    fn default() -> Self {
        Self::new(1.0)
    }
}
