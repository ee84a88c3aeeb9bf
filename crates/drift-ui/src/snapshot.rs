use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbaImage};

use drift_engine::raster::Canvas;

/// Converts a composed canvas into a straight-alpha RGBA image.
pub fn to_image(canvas: &Canvas) -> Result<RgbaImage> {
    RgbaImage::from_raw(canvas.width(), canvas.height(), canvas.to_rgba8_straight())
        .with_context(|| format!("canvas {}x{} does not fit an RGBA buffer", canvas.width(), canvas.height()))
}

/// Writes `canvas` to `path` as PNG.
pub fn save_png(canvas: &Canvas, path: &Path) -> Result<()> {
    let image = to_image(canvas)?;
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
