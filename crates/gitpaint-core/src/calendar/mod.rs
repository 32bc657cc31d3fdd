// crates/gitpaint-core/src/calendar/mod.rs

pub mod temporal;

/// Rows in one calendar column: one per weekday.
pub const CALENDAR_ROWS: u32 = 7;

pub const DAYS_PER_WEEK: i64 = 7;
