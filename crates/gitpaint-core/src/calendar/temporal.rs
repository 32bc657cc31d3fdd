// crates/gitpaint-core/src/calendar/temporal.rs

use chrono::{DateTime, Datelike, Days, TimeZone};

use crate::calendar::DAYS_PER_WEEK;

/// 0-based position of `now` in a Sunday-first week, matching the calendar's
/// top row.
pub fn weekday_index<Tz: TimeZone>(now: &DateTime<Tz>) -> u32 {
    now.weekday().num_days_from_sunday()
}

/// Days before today represented by the top cell of column 0.
pub fn start_days_ago(grid_width: u32, weeks_ago: u32, today_weekday: u32) -> i64 {
    (grid_width as i64 + weeks_ago as i64) * DAYS_PER_WEEK + today_weekday as i64
}

/// Days before today for the calendar cell at week column `x`, weekday row `y`.
///
/// Negative means the cell lies in the future; callers decide what to do with it.
pub fn days_ago(x: u32, y: u32, grid_width: u32, weeks_ago: u32, today_weekday: u32) -> i64 {
    start_days_ago(grid_width, weeks_ago, today_weekday) - x as i64 * DAYS_PER_WEEK - y as i64
}

/// `now` moved back by whole calendar days, keeping the time of day.
pub fn commit_date<Tz: TimeZone>(now: &DateTime<Tz>, days_ago: u64) -> Option<DateTime<Tz>> {
    now.clone().checked_sub_days(Days::new(days_ago))
}
