// crates/gitpaint-core/src/render.rs
//
// Human-facing views of a quantized image. The glyphs here are also the bytes
// written into commit content, so the terminal preview and the committed file
// always look the same.

use image::RgbaImage;

use crate::error::Result;
use crate::palette::quantize::QuantizedImage;
use crate::palette::{activity_color, MAX_INTENSITY};

const GLYPHS: [char; 5] = [' ', '░', '▒', '▓', '█'];

/// Fixed-width (3 char) glyph for an intensity: the level's block twice, then a space.
pub fn pixel_glyph(intensity: u8) -> String {
    let c = GLYPHS[intensity.min(MAX_INTENSITY) as usize];
    let mut s = String::with_capacity(8);
    s.push(c);
    s.push(c);
    s.push(' ');
    s
}

/// Glyph grid, one line per calendar row.
pub fn preview_text(q: &QuantizedImage) -> Result<String> {
    let mut out = String::new();
    for y in 0..q.height() {
        for x in 0..q.width() {
            out.push_str(&pixel_glyph(q.intensity_at(x, y)?));
        }
        out.push('\n');
    }
    Ok(out)
}

/// Replace every pixel with its activity palette color.
pub fn to_palette_image(q: &QuantizedImage) -> Result<RgbaImage> {
    let mut img = RgbaImage::new(q.width(), q.height());
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = activity_color(q.intensity_at(x, y)?);
    }
    Ok(img)
}
