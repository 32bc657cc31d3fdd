// crates/gitpaint-core/src/palette/mod.rs

pub mod median_cut;
pub mod quantize;

use image::Rgba;

/// Contribution calendar colors, index 0 = no activity, last = maximum activity.
pub const ACTIVITY_PALETTE: [Rgba<u8>; 5] = [
    Rgba([235, 237, 240, 255]), // no activity
    Rgba([155, 233, 168, 255]),
    Rgba([64, 196, 99, 255]),
    Rgba([48, 161, 78, 255]),
    Rgba([33, 110, 57, 255]), // maximum activity
];

/// Highest intensity index the calendar can show.
pub const MAX_INTENSITY: u8 = (ACTIVITY_PALETTE.len() - 1) as u8;

/// Palette color for an intensity, clamped to the top level.
pub fn activity_color(intensity: u8) -> Rgba<u8> {
    ACTIVITY_PALETTE[intensity.min(MAX_INTENSITY) as usize]
}
