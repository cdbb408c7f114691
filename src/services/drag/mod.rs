//! Drag and resize translation service entry point.
//! Converts pointer pixel deltas into whole-day reschedules and enforces
//! the start <= end ordering by clamping, never by reporting an error.

pub mod session;

use chrono::NaiveDate;

use crate::utils::date::add_days;

/// Longest reschedule a single gesture can express, one century of days.
const MAX_DRAG_DAYS: i64 = 36_500;

/// Which part of the task bar the pointer grabbed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    /// Whole bar: both dates shift, duration is invariant.
    Move,
    /// Left edge: start date shifts, end date stays.
    ResizeLeft,
    /// Right edge: end date shifts, start date stays.
    ResizeRight,
}

impl DragMode {
    /// Returns true if this mode moves the start date.
    pub fn adjusts_start(&self) -> bool {
        matches!(self, DragMode::Move | DragMode::ResizeLeft)
    }

    /// Returns true if this mode moves the end date.
    pub fn adjusts_end(&self) -> bool {
        matches!(self, DragMode::Move | DragMode::ResizeRight)
    }
}

/// Bucket a pointer delta into whole day columns.
///
/// The fractional day is dropped until it reaches the snap threshold, then
/// the delta rounds to the next column. A threshold of 0.5 is plain
/// round-to-nearest; smaller values make bars snap over sooner. Ratios
/// past a century in either direction clamp to that limit.
pub fn days_delta(delta_px: f32, day_column_px: f32, snap_threshold: f32) -> i64 {
    // A non-finite delta or degenerate column width is a caller bug;
    // treat it as no movement rather than poisoning the drag.
    if !delta_px.is_finite() || !day_column_px.is_finite() || day_column_px <= 0.0 {
        return 0;
    }

    let days = delta_px / day_column_px;
    let whole = days.trunc();
    let fraction = (days - whole).abs();
    let snapped = if fraction > 0.0 && fraction >= snap_threshold {
        whole + days.signum()
    } else {
        whole
    };
    (snapped as i64).clamp(-MAX_DRAG_DAYS, MAX_DRAG_DAYS)
}

/// Apply a whole-day delta to an inclusive date range.
///
/// A resize that would push one edge past the other collapses the range
/// to a single day instead of inverting it.
pub fn translate(
    start: NaiveDate,
    end: NaiveDate,
    mode: DragMode,
    days: i64,
) -> (NaiveDate, NaiveDate) {
    match mode {
        DragMode::Move => (add_days(start, days), add_days(end, days)),
        DragMode::ResizeLeft => {
            let moved = add_days(start, days);
            (moved.min(end), end)
        }
        DragMode::ResizeRight => {
            let moved = add_days(end, days);
            (start, moved.max(start))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_mode_edges() {
        assert!(DragMode::Move.adjusts_start());
        assert!(DragMode::Move.adjusts_end());
        assert!(DragMode::ResizeLeft.adjusts_start());
        assert!(!DragMode::ResizeLeft.adjusts_end());
        assert!(!DragMode::ResizeRight.adjusts_start());
        assert!(DragMode::ResizeRight.adjusts_end());
    }

    #[test_case(0.0, 36.0, 0.5, 0; "no movement")]
    #[test_case(17.9, 36.0, 0.5, 0; "under half a column")]
    #[test_case(18.0, 36.0, 0.5, 1; "exactly half a column")]
    #[test_case(-18.0, 36.0, 0.5, -1; "half a column left")]
    #[test_case(53.9, 36.0, 0.5, 1; "one and under half")]
    #[test_case(54.0, 36.0, 0.5, 2; "one and a half")]
    #[test_case(-90.0, 36.0, 0.5, -3; "two and a half left")]
    #[test_case(9.0, 36.0, 0.25, 1; "low threshold snaps early")]
    #[test_case(35.9, 36.0, 1.0, 0; "threshold one truncates")]
    #[test_case(36.0, 36.0, 1.0, 1; "full column at threshold one")]
    #[test_case(0.1, 36.0, 0.0, 1; "threshold zero snaps immediately")]
    fn test_days_delta(delta_px: f32, column: f32, threshold: f32, expected: i64) {
        assert_eq!(days_delta(delta_px, column, threshold), expected);
    }

    #[test]
    fn test_days_delta_bad_geometry_is_inert() {
        assert_eq!(days_delta(100.0, 0.0, 0.5), 0);
        assert_eq!(days_delta(f32::NAN, 36.0, 0.5), 0);
        assert_eq!(days_delta(f32::INFINITY, 36.0, 0.5), 0);
    }

    #[test]
    fn test_days_delta_clamps_absurd_ratios() {
        assert_eq!(days_delta(f32::MAX, 1.0, 0.5), MAX_DRAG_DAYS);
        assert_eq!(days_delta(f32::MIN, 1.0, 0.5), -MAX_DRAG_DAYS);
        assert_eq!(days_delta(1.0e12, 0.001, 0.5), MAX_DRAG_DAYS);
    }

    #[test]
    fn test_clamped_runaway_move_keeps_dates_in_range() {
        let days = days_delta(f32::MAX, 0.25, 0.5);
        let (start, end) = translate(ymd(2025, 3, 3), ymd(2025, 3, 5), DragMode::Move, days);

        assert_eq!(start, add_days(ymd(2025, 3, 3), MAX_DRAG_DAYS));
        assert_eq!((end - start).num_days(), 2);
    }

    #[test]
    fn test_move_shifts_both_dates() {
        let (start, end) = translate(ymd(2025, 3, 3), ymd(2025, 3, 5), DragMode::Move, 4);
        assert_eq!(start, ymd(2025, 3, 7));
        assert_eq!(end, ymd(2025, 3, 9));
    }

    #[test]
    fn test_move_preserves_duration_backwards() {
        let (start, end) = translate(ymd(2025, 3, 3), ymd(2025, 3, 5), DragMode::Move, -10);
        assert_eq!(start, ymd(2025, 2, 21));
        assert_eq!(end, ymd(2025, 2, 23));
    }

    #[test]
    fn test_resize_left_extends_backwards() {
        let (start, end) = translate(ymd(2025, 3, 3), ymd(2025, 3, 5), DragMode::ResizeLeft, -2);
        assert_eq!(start, ymd(2025, 3, 1));
        assert_eq!(end, ymd(2025, 3, 5));
    }

    #[test]
    fn test_resize_left_clamps_at_end() {
        let (start, end) = translate(ymd(2025, 3, 3), ymd(2025, 3, 5), DragMode::ResizeLeft, 10);
        assert_eq!(start, ymd(2025, 3, 5));
        assert_eq!(end, ymd(2025, 3, 5));
    }

    #[test]
    fn test_resize_right_extends_forwards() {
        let (start, end) = translate(ymd(2025, 3, 3), ymd(2025, 3, 5), DragMode::ResizeRight, 3);
        assert_eq!(start, ymd(2025, 3, 3));
        assert_eq!(end, ymd(2025, 3, 8));
    }

    #[test]
    fn test_resize_right_clamps_at_start() {
        let (start, end) = translate(ymd(2025, 3, 3), ymd(2025, 3, 5), DragMode::ResizeRight, -10);
        assert_eq!(start, ymd(2025, 3, 3));
        assert_eq!(end, ymd(2025, 3, 3));
    }

    #[test]
    fn test_single_day_resizes_stay_single_day() {
        let day = ymd(2025, 3, 3);
        assert_eq!(translate(day, day, DragMode::ResizeLeft, 5), (day, day));
        assert_eq!(translate(day, day, DragMode::ResizeRight, -5), (day, day));
    }
}
