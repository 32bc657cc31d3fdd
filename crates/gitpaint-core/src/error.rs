use thiserror::Error;

pub type Result<T> = std::result::Result<T, GpError>;

#[derive(Debug, Error)]
pub enum GpError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    #[error("image dimensions: {0}")]
    Dimensions(String),

    /// A record would land after "now". Raised before any commit is emitted.
    #[error("record {index} at ({x},{y}) maps to {days_ago} days ago, which is in the future")]
    FutureDate {
        index: usize,
        x: u32,
        y: u32,
        days_ago: i64,
    },

    #[error("record {index} at ({x},{y}): {days_ago} days ago is outside the representable date range")]
    DateOutOfRange {
        index: usize,
        x: u32,
        y: u32,
        days_ago: i64,
    },

    #[error("gray value {gray} at ({x},{y}) is missing from the intensity map")]
    UnmappedGray { gray: u8, x: u32, y: u32 },

    #[error("repository driver failed at record {index} (level {level}, amplify {amplify})")]
    Driver {
        index: usize,
        level: u8,
        amplify: u32,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
