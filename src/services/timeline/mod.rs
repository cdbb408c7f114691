//! Timeline layout service entry point.
//! Filters the task snapshot to a visible window, splits it into grouping
//! rows, packs each row into non-overlapping lanes, and maps day ranges to
//! pixel bars for rendering.

pub mod geometry;
pub mod grouping;
pub mod lanes;

use chrono::NaiveDate;

use crate::utils::date::span_days;

/// Inclusive day window rendered by the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if start > end {
            return Err("Window start must not be after its end".to_string());
        }
        Ok(Self { start, end })
    }

    /// Number of day columns in the window.
    pub fn days(&self) -> i64 {
        span_days(self.start, self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
