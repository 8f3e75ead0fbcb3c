use std::path::Path;

use anyhow::{Context, Result};
use image::ImageFormat;
use image::imageops::FilterType;
use tracing::{debug, info};

use crate::image_buf::ImageBuf;

/// Raster formats offered by the file picker.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif"];

pub fn is_supported_extension(ext: &str) -> bool {
    let lower = ext.to_ascii_lowercase();
    SUPPORTED_EXTENSIONS.contains(&lower.as_str())
}

/// Decode an image file as RGB and shrink it by `scale` on both axes.
pub fn load(path: &Path, scale: f32) -> Result<ImageBuf> {
    anyhow::ensure!(
        scale > 0.0 && scale <= 1.0,
        "load scale must be in (0, 1], got {scale}"
    );

    let t0 = std::time::Instant::now();
    let decoded = image::open(path)
        .with_context(|| format!("failed to decode image: {}", path.display()))?
        .to_rgb8();

    let (w, h) = scaled_dimensions(decoded.width(), decoded.height(), scale);
    let rgb = if (w, h) == decoded.dimensions() {
        decoded
    } else {
        image::imageops::resize(&decoded, w, h, FilterType::Triangle)
    };

    info!(
        ?path,
        w,
        h,
        elapsed_ms = t0.elapsed().as_millis(),
        "image loaded"
    );
    Ok(ImageBuf::Color(rgb))
}

/// Target size for a shrink by `scale`, never collapsing an axis to zero.
pub fn scaled_dimensions(width: u32, height: u32, scale: f32) -> (u32, u32) {
    let w = ((width as f32 * scale) as u32).max(1);
    let h = ((height as f32 * scale) as u32).max(1);
    (w, h)
}

/// Encode an image in the format implied by the path's extension.
pub fn save(buf: &ImageBuf, path: &Path) -> Result<()> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    anyhow::ensure!(
        is_supported_extension(ext),
        "unsupported output format: {}",
        path.display()
    );
    let format = ImageFormat::from_extension(ext)
        .with_context(|| format!("no encoder for extension {ext:?}"))?;

    buf.clone()
        .into_dynamic()
        .save_with_format(path, format)
        .with_context(|| format!("failed to write image: {}", path.display()))?;

    debug!(?path, ?format, "image saved");
    Ok(())
}
