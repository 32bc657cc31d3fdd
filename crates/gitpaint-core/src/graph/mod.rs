// crates/gitpaint-core/src/graph/mod.rs

use crate::calendar::temporal;
use crate::calendar::CALENDAR_ROWS;
use crate::error::{GpError, Result};
use crate::palette::quantize::QuantizedImage;
use crate::palette::MAX_INTENSITY;

/// One calendar cell: where it sits in the pixel grid, which day it lands on
/// and how dark it should render.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PixelRecord {
    pub x: u32,
    pub y: u32,
    pub days_ago: i64,
    pub intensity: u8,
}

/// Row-major sequence of pixel records for one image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    width: u32,
    height: u32,
    records: Vec<PixelRecord>,
}

impl Graph {
    /// Resolve every pixel of `q` to a record, keeping row-major scan order.
    ///
    /// Intensity-0 cells are kept; they emit no commits but still count for
    /// row layout.
    pub fn build(q: &QuantizedImage, weeks_ago: u32, today_weekday: u32) -> Result<Self> {
        let (width, height) = (q.width(), q.height());
        check_bounds(width, height)?;

        let mut records = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                records.push(PixelRecord {
                    x,
                    y,
                    days_ago: temporal::days_ago(x, y, width, weeks_ago, today_weekday),
                    intensity: q.intensity_at(x, y)?,
                });
            }
        }

        tracing::debug!(width, height, weeks_ago, today_weekday, "built graph");
        Ok(Graph { width, height, records })
    }

    /// Assemble a graph from precomputed records (row-major, `width * height` of them).
    pub fn from_records(width: u32, height: u32, records: Vec<PixelRecord>) -> Result<Self> {
        check_bounds(width, height)?;
        if records.len() != (width as usize) * (height as usize) {
            return Err(GpError::Dimensions(format!(
                "{} records for a {}x{} grid",
                records.len(),
                width,
                height
            )));
        }
        if let Some(i) = records.iter().position(|r| r.intensity > MAX_INTENSITY) {
            return Err(GpError::Validation(format!(
                "record {i}: intensity {} exceeds {MAX_INTENSITY}",
                records[i].intensity
            )));
        }
        Ok(Graph { width, height, records })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn records(&self) -> &[PixelRecord] {
        &self.records
    }

    /// True when record `index` is the last cell of its grid row.
    pub fn is_row_end(&self, index: usize) -> bool {
        (index + 1) % self.width as usize == 0
    }

    /// Total commits the encoder will request under `multiplier`.
    pub fn commit_count(&self, multiplier: u32) -> u64 {
        self.records
            .iter()
            .map(|r| r.intensity as u64 * multiplier as u64)
            .sum()
    }

    /// (min, max) days_ago over records that produce commits.
    pub fn active_span(&self) -> Option<(i64, i64)> {
        let mut it = self.records.iter().filter(|r| r.intensity > 0).map(|r| r.days_ago);
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    /// First record whose date would be in the future, if any.
    pub fn first_future(&self) -> Option<(usize, &PixelRecord)> {
        self.records.iter().enumerate().find(|(_, r)| r.days_ago < 0)
    }
}

fn check_bounds(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(GpError::EmptyImage { width, height });
    }
    if height > CALENDAR_ROWS {
        return Err(GpError::Dimensions(format!(
            "height {height} exceeds {CALENDAR_ROWS} calendar rows"
        )));
    }
    Ok(())
}
