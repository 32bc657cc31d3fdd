// crates/gitpaint-core/src/config/defaults.rs

use crate::config::{ContentMode, EncodeParams};
use crate::palette::ACTIVITY_PALETTE;

/// Two commits per level is enough to drown out a typical day of unrelated
/// activity without bloating the repository.
pub const DEFAULT_MULTIPLIER: u32 = 2;

pub const DEFAULT_TARGET_FILE: &str = "README.md";

pub fn default_params() -> EncodeParams {
    EncodeParams {
        weeks_ago: 0,
        multiplier: DEFAULT_MULTIPLIER,
        palette_size: ACTIVITY_PALETTE.len(),
        target_file: DEFAULT_TARGET_FILE.to_string(),
        content_mode: ContentMode::History,
    }
}
