pub mod error;
pub mod validate;

pub mod config;
pub mod palette;
pub mod calendar;
pub mod graph;
pub mod encode;
pub mod render;

pub use crate::config::{ContentMode, EncodeParams};
pub use crate::encode::{CommitRequest, Encoder};
pub use crate::graph::{Graph, PixelRecord};
pub use crate::palette::quantize::{quantize, IntensityMap, QuantizedImage};
