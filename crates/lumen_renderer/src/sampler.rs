//! Per-row pixel sampling.

use rand::RngCore;

use crate::integrator::{trace_pixel, TraceParams};
use crate::{Camera, Color, Progress, Scene};

/// Mean of a stream of colors, updated without storing the samples.
///
/// `avg_n = mix(avg_{n-1}, sample_n, 1 / n)`
#[derive(Debug, Clone, Copy, Default)]
pub struct RunningAverage {
    value: Color,
    count: u32,
}

impl RunningAverage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one more sample into the mean.
    #[inline]
    pub fn push(&mut self, sample: Color) {
        self.count += 1;
        self.value = self.value.mix(sample, 1.0 / self.count as f64);
    }

    /// Current mean; black before the first sample.
    pub fn value(&self) -> Color {
        self.value
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

/// Everything needed to turn a row index into averaged pixel colors.
#[derive(Clone, Copy)]
pub struct PixelSampler<'a> {
    scene: &'a Scene,
    camera: Camera,
    params: TraceParams,
    width: u32,
    samples_per_pixel: u32,
}

impl<'a> PixelSampler<'a> {
    pub fn new(
        scene: &'a Scene,
        camera: Camera,
        params: TraceParams,
        width: u32,
        samples_per_pixel: u32,
    ) -> Self {
        Self {
            scene,
            camera,
            params,
            width,
            samples_per_pixel,
        }
    }

    /// Average `samples_per_pixel` jittered paths for every column of `row`.
    ///
    /// `rng` belongs to the calling worker. Each finished pixel is counted
    /// in `progress`.
    pub fn process_line(&self, row: u32, rng: &mut dyn RngCore, progress: &Progress) -> Vec<Color> {
        let mut line = Vec::with_capacity(self.width as usize);

        for column in 0..self.width {
            let mut average = RunningAverage::new();
            for _ in 0..self.samples_per_pixel {
                let ray = self.camera.get_ray(column, row, rng);
                average.push(trace_pixel(ray, self.scene, &self.params, rng));
            }
            line.push(average.value());
            progress.pixel_done();
        }

        line
    }
}
