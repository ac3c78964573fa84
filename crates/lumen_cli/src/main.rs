mod cli;
mod scene;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::LevelFilter;
use lumen_core::{RenderSettings, SceneDescription};
use lumen_renderer::Renderer;

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::from(args.log_level))
        .init();

    log::info!("Starting Lumen {}", env!("CARGO_PKG_VERSION"));

    let mut settings = match &args.config {
        Some(path) => RenderSettings::from_file(path)
            .with_context(|| format!("Failed to load render settings from {}", path.display()))?,
        None => {
            log::info!("No config given, using default render settings");
            RenderSettings::default()
        }
    };
    args.apply_overrides(&mut settings);
    settings.validate().context("Invalid render settings")?;

    let description = match &args.scene {
        Some(path) => SceneDescription::from_file(path)
            .with_context(|| format!("Failed to load scene from {}", path.display()))?,
        None => {
            log::info!("No scene given, rendering the built-in Cornell box");
            scene::cornell_box()
        }
    };

    let mut renderer = Renderer::new(settings).context("Failed to create renderer")?;
    renderer
        .add_scene(&description)
        .context("Failed to build scene")?;
    renderer.start().context("Render failed")?;

    if !renderer.save_to_disk() {
        bail!(
            "Could not save image to {}",
            renderer.settings().output_path().display()
        );
    }

    Ok(())
}
