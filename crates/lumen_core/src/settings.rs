//! Render settings loaded from a JSON configuration file.
//!
//! Every engine parameter is required in the file; a missing or malformed
//! value is a startup failure. `threads` and `seed` are optional.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur while loading or validating settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Parameters fixed for the lifetime of one render.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RenderSettings {
    /// Hits closer than this are ignored (self-intersection guard)
    pub min_ray_distance: f64,

    /// Hits at or beyond this distance count as misses
    pub max_ray_distance: f64,

    /// Hard cap on path length
    pub max_bounces: u32,

    /// Jittered camera rays per pixel
    pub samples_per_pixel: u32,

    /// Linear multiplier applied before tone mapping
    pub exposure: f64,

    /// Horizontal field of view in degrees
    pub fov_degrees: f64,

    /// Output width in pixels
    pub width: u32,

    /// Output height in pixels
    pub height: u32,

    /// Directory the image is written to
    pub output_dir: PathBuf,

    /// File name; the extension selects the format (`.ppm`, `.png`)
    pub output_name: String,

    /// Worker thread count, defaults to the number of logical processors
    #[serde(default)]
    pub threads: Option<usize>,

    /// Base seed for per-worker random sources
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            min_ray_distance: 0.01,
            max_ray_distance: 10000.0,
            max_bounces: 8,
            samples_per_pixel: 64,
            exposure: 0.5,
            fov_degrees: 90.0,
            width: 640,
            height: 360,
            output_dir: PathBuf::from("."),
            output_name: "render.ppm".to_string(),
            threads: None,
            seed: None,
        }
    }
}

impl RenderSettings {
    /// Load and validate settings from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&contents)?;
        log::debug!("Loaded render settings from {}", path.display());
        Ok(settings)
    }

    /// Parse and validate settings from a JSON string.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that every value is usable by the renderer.
    pub fn validate(&self) -> ConfigResult<()> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if self.width == 0 {
            return Err(invalid("width", "must be at least 1"));
        }
        if self.height == 0 {
            return Err(invalid("height", "must be at least 1"));
        }
        if self.samples_per_pixel == 0 {
            return Err(invalid("samples_per_pixel", "must be at least 1"));
        }
        if self.max_bounces == 0 {
            return Err(invalid("max_bounces", "must be at least 1"));
        }
        if !self.min_ray_distance.is_finite() || self.min_ray_distance < 0.0 {
            return Err(invalid("min_ray_distance", "must be finite and non-negative"));
        }
        if !self.max_ray_distance.is_finite() || self.max_ray_distance <= self.min_ray_distance {
            return Err(invalid(
                "max_ray_distance",
                format!("must be finite and greater than {}", self.min_ray_distance),
            ));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(invalid("fov_degrees", "must be in (0, 180)"));
        }
        if !self.exposure.is_finite() || self.exposure < 0.0 {
            return Err(invalid("exposure", "must be finite and non-negative"));
        }
        if self.output_name.trim().is_empty() {
            return Err(invalid("output_name", "must not be empty"));
        }
        if self.threads == Some(0) {
            return Err(invalid("threads", "must be at least 1"));
        }
        Ok(())
    }

    /// Full path of the output image.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_name)
    }

    /// Total number of pixels in the output image.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.width as f64 / self.height as f64
    }
}
