//! Lumen Core - render settings and scene descriptions.
//!
//! This crate provides:
//!
//! - **Settings**: `RenderSettings`, loaded from JSON and validated up front
//! - **Scene descriptions**: named materials and the primitives using them
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{RenderSettings, SceneDescription};
//!
//! let settings = RenderSettings::from_file("render.json")?;
//! let scene = SceneDescription::from_file("cornell.json")?;
//! println!("{}x{}, {} primitives",
//!     settings.width,
//!     settings.height,
//!     scene.primitives.len());
//! ```

pub mod scene;
pub mod settings;

// Re-export commonly used types
pub use scene::{
    MaterialDescription, PrimitiveDescription, SceneDescription, SceneError, SceneResult,
};
pub use settings::{ConfigError, ConfigResult, RenderSettings};
