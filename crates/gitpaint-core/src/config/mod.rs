// crates/gitpaint-core/src/config/mod.rs

pub mod defaults;

/// How commit content is made unique across one encode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ContentMode {
    /// Every glyph rendered so far, the current level glyph, then `amplify - 1` fillers.
    History,
    /// Current level glyph plus a per-image sequence number.
    Sequence,
}

/// Knobs consumed by the graph builder and the commit encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeParams {
    /// Shifts the whole image this many weeks into the past.
    pub weeks_ago: u32,
    /// Commits emitted per intensity level (M).
    pub multiplier: u32,
    /// Number of activity levels the quantizer may produce.
    pub palette_size: usize,
    /// Single tracked file rewritten for every commit.
    pub target_file: String,
    pub content_mode: ContentMode,
}

impl Default for EncodeParams {
    fn default() -> Self {
        defaults::default_params()
    }
}
