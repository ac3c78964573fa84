//! Lumen Renderer - multi-threaded CPU path tracing
//!
//! A Monte Carlo path tracer for scenes built from quads and spheres.
//! A pool of workers pulls image rows from a shared queue, averages
//! `samples_per_pixel` traced paths per pixel, and flushes finished rows
//! through the display transform into one shared image.
//!
//! ```ignore
//! use lumen_core::{RenderSettings, SceneDescription};
//! use lumen_renderer::Renderer;
//!
//! let mut renderer = Renderer::new(RenderSettings::from_file("render.json")?)?;
//! renderer.add_scene(&SceneDescription::from_file("cornell.json")?)?;
//! renderer.start()?;
//! renderer.save_to_disk();
//! ```

mod camera;
mod color;
mod error;
mod integrator;
mod material;
mod output;
mod post;
mod primitive;
mod progress;
mod quad;
mod random;
mod renderer;
mod sampler;
mod scene;
mod scheduler;
mod sphere;
mod work_queue;

pub use camera::Camera;
pub use color::{Color, DISPLAY_GAMMA};
pub use error::{RenderError, RenderResult};
pub use integrator::{reflect, trace_pixel, TraceParams, RAY_NUDGE};
pub use material::Material;
pub use post::PostProcess;
pub use primitive::{HitRecord, Primitive};
pub use progress::Progress;
pub use quad::Quad;
pub use renderer::{ImageBuffer, Renderer};
pub use sampler::{PixelSampler, RunningAverage};
pub use scene::Scene;
pub use scheduler::Scheduler;
pub use sphere::Sphere;
pub use work_queue::LineQueue;

/// Re-export the math types used throughout the public API
pub use lumen_math::{Interval, Ray, Vec3};
