// crates/gitpaint-cli/src/io/image_file.rs

use anyhow::{Context, Result};
use gitpaint_core::calendar::CALENDAR_ROWS;
use gitpaint_core::palette::quantize::{quantize, QuantizedImage};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Decode an image file (format guessed from content/extension).
pub fn load_image(path: &str) -> Result<DynamicImage> {
    image::open(path).with_context(|| format!("read image {path}"))
}

/// Shrink images taller than a calendar column to exactly 7 rows,
/// keeping the aspect ratio. Nearest-neighbour so no new colors appear.
pub fn fit_calendar(img: DynamicImage) -> DynamicImage {
    let (w, h) = img.dimensions();
    if h <= CALENDAR_ROWS {
        return img;
    }
    let new_w = ((w as u64 * CALENDAR_ROWS as u64 + h as u64 / 2) / h as u64).max(1) as u32;
    img.resize_exact(new_w, CALENDAR_ROWS, FilterType::Nearest)
}

/// Load, fit and quantize in one go.
pub fn load_quantized(path: &str, palette_size: usize) -> Result<QuantizedImage> {
    let img = fit_calendar(load_image(path)?);
    let (w, h) = img.dimensions();
    let q = quantize(&img, palette_size).with_context(|| format!("quantize {path}"))?;
    tracing::info!(path, width = w, height = h, levels = q.intensity.len(), "image loaded");
    Ok(q)
}
