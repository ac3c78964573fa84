//! Pinhole camera for ray generation.
//!
//! The camera sits at the origin looking down +Z. Image rows grow
//! downwards while render-space v grows upwards, so v is flipped.

use crate::random::gen_offset;
use lumen_math::{Ray, Vec3};
use rand::RngCore;

/// Camera for generating jittered primary rays.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    image_width: u32,
    image_height: u32,
    /// Distance to the image plane for the requested field of view
    camera_distance: f64,
    aspect_ratio: f64,
}

impl Camera {
    /// Create a camera for an image of the given size and field of view.
    pub fn new(image_width: u32, image_height: u32, fov_degrees: f64) -> Self {
        Self {
            image_width,
            image_height,
            camera_distance: Self::distance_for_fov(fov_degrees),
            aspect_ratio: image_width as f64 / image_height as f64,
        }
    }

    /// `1 / tan(fov / 2)`: the plane distance at which the view spans `[-1, 1]`.
    pub fn distance_for_fov(fov_degrees: f64) -> f64 {
        1.0 / (fov_degrees * 0.5).to_radians().tan()
    }

    pub fn camera_distance(&self) -> f64 {
        self.camera_distance
    }

    /// Ray through pixel `(x, y)` offset by `jitter` (each axis in `[-0.5, 0.5]`).
    pub fn ray_through(&self, x: u32, y: u32, jitter: (f64, f64)) -> Ray {
        // Pixel space -> [0, 1], flip v.
        let mut u = (x as f64 + 0.5 + jitter.0) / self.image_width as f64;
        let mut v = (y as f64 + 0.5 + jitter.1) / self.image_height as f64;
        v = 1.0 - v;

        // [0, 1] -> [-1, 1], then correct v for the aspect ratio.
        u = u * 2.0 - 1.0;
        v = (v * 2.0 - 1.0) / self.aspect_ratio;

        Ray::new(Vec3::ZERO, Vec3::new(u, v, self.camera_distance))
    }

    /// Ray through pixel `(x, y)` with a random sub-pixel offset.
    pub fn get_ray(&self, x: u32, y: u32, rng: &mut dyn RngCore) -> Ray {
        let jitter = (gen_offset(rng), gen_offset(rng));
        self.ray_through(x, y, jitter)
    }
}
