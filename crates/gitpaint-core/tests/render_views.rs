use gitpaint_core::palette::quantize::QuantizedImage;
use gitpaint_core::palette::ACTIVITY_PALETTE;
use gitpaint_core::render::{pixel_glyph, preview_text, to_palette_image};
use image::{GrayImage, Luma};

#[test]
fn glyphs_are_fixed_width() {
    for level in 0..5u8 {
        assert_eq!(pixel_glyph(level).chars().count(), 3);
    }
    assert_eq!(pixel_glyph(0), "   ");
    assert_eq!(pixel_glyph(4), "██ ");
    // out-of-range clamps to the top level
    assert_eq!(pixel_glyph(9), pixel_glyph(4));
}

#[test]
fn glyphs_never_contain_the_filler() {
    for level in 0..5u8 {
        assert!(!pixel_glyph(level).contains('<'));
        assert!(!pixel_glyph(level).contains('`'));
    }
}

#[test]
fn preview_has_one_line_per_row() {
    let gray = GrayImage::from_fn(3, 7, |x, _| Luma([if x == 1 { 0 } else { 255 }]));
    let q = QuantizedImage::from_gray(gray);
    let text = preview_text(&q).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    for l in lines {
        assert_eq!(l, "   ░░    ");
    }
}

#[test]
fn palette_image_uses_activity_colors() {
    let gray = GrayImage::from_fn(2, 7, |x, _| Luma([if x == 0 { 10 } else { 200 }]));
    let q = QuantizedImage::from_gray(gray);
    let img = to_palette_image(&q).unwrap();
    assert_eq!(img.dimensions(), (2, 7));
    assert_eq!(*img.get_pixel(0, 3), ACTIVITY_PALETTE[1]);
    assert_eq!(*img.get_pixel(1, 3), ACTIVITY_PALETTE[0]);
}
