// crates/gitpaint-core/src/palette/quantize.rs

use std::collections::{BTreeMap, BTreeSet};

use image::{imageops, DynamicImage, GenericImageView, GrayImage, Luma, Pixel, RgbImage, Rgba, RgbaImage};

use crate::error::{GpError, Result};
use crate::palette::{median_cut, ACTIVITY_PALETTE};

/// Gray value -> activity intensity for one image.
///
/// Built from the grays actually present, so the darkest gray always gets the
/// highest intensity and the lightest gets 0.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntensityMap {
    levels: BTreeMap<u8, u8>,
}

impl IntensityMap {
    pub fn from_gray(img: &GrayImage) -> Self {
        let grays: BTreeSet<u8> = img.pixels().map(|p| p.0[0]).collect();
        let n = grays.len();
        let levels = grays
            .into_iter()
            .enumerate()
            .map(|(i, g)| (g, (n - 1 - i) as u8))
            .collect();
        IntensityMap { levels }
    }

    pub fn get(&self, gray: u8) -> Option<u8> {
        self.levels.get(&gray).copied()
    }

    /// Number of distinct grays (and therefore intensities).
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// (gray, intensity) pairs in ascending gray order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.levels.iter().map(|(g, i)| (*g, *i))
    }
}

#[derive(Clone, Debug)]
pub struct QuantizedImage {
    pub gray: GrayImage,
    pub intensity: IntensityMap,
}

impl QuantizedImage {
    /// Wrap an already-quantized gray image.
    pub fn from_gray(gray: GrayImage) -> Self {
        let intensity = IntensityMap::from_gray(&gray);
        QuantizedImage { gray, intensity }
    }

    pub fn width(&self) -> u32 {
        self.gray.width()
    }

    pub fn height(&self) -> u32 {
        self.gray.height()
    }

    pub fn intensity_at(&self, x: u32, y: u32) -> Result<u8> {
        let gray = self.gray.get_pixel(x, y).0[0];
        self.intensity
            .get(gray)
            .ok_or(GpError::UnmappedGray { gray, x, y })
    }
}

/// Reduce `img` to at most `palette_size` gray levels and rank them.
pub fn quantize(img: &DynamicImage, palette_size: usize) -> Result<QuantizedImage> {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Err(GpError::EmptyImage { width: w, height: h });
    }
    if !(2..=ACTIVITY_PALETTE.len()).contains(&palette_size) {
        return Err(GpError::Validation(format!(
            "palette_size must be in 2..={}",
            ACTIVITY_PALETTE.len()
        )));
    }

    let opaque = flatten_on_white(img);
    let palette = median_cut::palette(&opaque, palette_size);

    let gray = GrayImage::from_fn(w, h, |x, y| {
        let c = opaque.get_pixel(x, y);
        let idx = median_cut::nearest(&palette, c);
        palette.get(idx).map(|p| p.to_luma()).unwrap_or(Luma([255]))
    });

    let q = QuantizedImage::from_gray(gray);
    tracing::debug!(
        width = w,
        height = h,
        palette = palette.len(),
        levels = q.intensity.len(),
        "quantized image"
    );
    Ok(q)
}

/// Composite onto opaque white so transparent pixels read as background.
pub fn flatten_on_white(img: &DynamicImage) -> RgbImage {
    let (w, h) = img.dimensions();
    let mut canvas = RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &img.to_rgba8(), 0, 0);
    DynamicImage::ImageRgba8(canvas).to_rgb8()
}
