//! Render driver.
//!
//! `Renderer` owns the scene and the output image. `start` spreads the
//! image rows over the worker pool and blocks until every row has been
//! traced and flushed.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use lumen_core::{RenderSettings, SceneDescription};

use crate::integrator::TraceParams;
use crate::{
    output, Camera, Color, LineQueue, PixelSampler, PostProcess, Primitive, Progress,
    RenderResult, Scene, Scheduler,
};

/// Row-major buffer of output colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let i = self.index(x, y);
        self.pixels[i] = color;
    }

    /// Overwrite row `y` with up to `width` colors.
    pub fn set_row(&mut self, y: u32, colors: impl IntoIterator<Item = Color>) {
        let start = self.index(0, y);
        let row = &mut self.pixels[start..start + self.width as usize];
        for (dst, src) in row.iter_mut().zip(colors) {
            *dst = src;
        }
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// Convert to packed 8-bit RGB (for saving).
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for color in &self.pixels {
            bytes.extend_from_slice(&color.to_rgb8());
        }
        bytes
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

/// Owns a scene and renders it into an image with a pool of workers.
pub struct Renderer {
    settings: RenderSettings,
    scene: Scene,
    image: Mutex<ImageBuffer>,
}

impl Renderer {
    /// Create a renderer; invalid settings are rejected here.
    pub fn new(settings: RenderSettings) -> RenderResult<Self> {
        settings.validate()?;
        let image = ImageBuffer::new(settings.width, settings.height);
        Ok(Self {
            settings,
            scene: Scene::new(),
            image: Mutex::new(image),
        })
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Append a primitive to the scene.
    pub fn add_primitive(&mut self, primitive: impl Primitive + 'static) {
        self.scene.add(primitive);
    }

    /// Append every primitive of a scene description.
    pub fn add_scene(&mut self, desc: &SceneDescription) -> RenderResult<()> {
        let scene = Scene::from_description(desc)?;
        self.scene.append(scene);
        Ok(())
    }

    /// Render the whole image, blocking until every row is flushed.
    pub fn start(&self) -> RenderResult<()> {
        let settings = &self.settings;
        let scheduler = match settings.threads {
            Some(threads) => Scheduler::new(threads),
            None => Scheduler::per_cpu(),
        }
        .with_seed(settings.seed);

        log::info!(
            "Rendering {}x{} @ {} spp, {} bounces, {} primitives on {} threads",
            settings.width,
            settings.height,
            settings.samples_per_pixel,
            settings.max_bounces,
            self.scene.len(),
            scheduler.threads()
        );

        let camera = Camera::new(settings.width, settings.height, settings.fov_degrees);
        let params = TraceParams {
            min_ray_distance: settings.min_ray_distance,
            max_ray_distance: settings.max_ray_distance,
            max_bounces: settings.max_bounces,
        };
        let sampler = PixelSampler::new(
            &self.scene,
            camera,
            params,
            settings.width,
            settings.samples_per_pixel,
        );
        let queue = LineQueue::new(settings.height);
        let progress = Progress::new(settings.pixel_count());
        let post = PostProcess::new(settings.exposure);

        let start = Instant::now();
        scheduler.run(
            &queue,
            |row, rng| sampler.process_line(row, rng, &progress),
            &progress,
            &self.image,
            &post,
        )?;
        log::info!("Rendered in {:.2?}", start.elapsed());

        Ok(())
    }

    /// Lock and borrow the output image.
    pub fn image(&self) -> MutexGuard<'_, ImageBuffer> {
        self.image.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Take the output image, consuming the renderer.
    pub fn into_image(self) -> ImageBuffer {
        self.image.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Write the output image to `path`; the extension selects the format.
    pub fn write_image(&self, path: impl AsRef<Path>) -> RenderResult<()> {
        output::write_image(&self.image(), path.as_ref())
    }

    /// Write the output image to the configured location.
    ///
    /// Failures are logged and reported as `false`.
    pub fn save_to_disk(&self) -> bool {
        let path = self.settings.output_path();
        match self.write_image(&path) {
            Ok(()) => {
                log::info!("Saved {}", path.display());
                true
            }
            Err(e) => {
                log::error!("Failed to save {}: {}", path.display(), e);
                false
            }
        }
    }
}
