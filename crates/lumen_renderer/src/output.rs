//! Writing finished images to disk.

use std::path::Path;

use crate::{ImageBuffer, RenderResult};

/// Save `image` as 8-bit RGB. The file extension selects the encoder
/// (`.ppm`, `.png`, ...); missing parent directories are created.
pub fn write_image(image: &ImageBuffer, path: &Path) -> RenderResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let bytes = image.to_rgb8();
    image::save_buffer(path, &bytes, image.width, image.height, image::ColorType::Rgb8)?;
    log::debug!("Wrote {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
