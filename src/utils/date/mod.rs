// Date utility functions
// Day-granularity calendar arithmetic shared by layout and recurrence

use chrono::{Datelike, Duration, NaiveDate};

/// Shift a date by a signed number of days.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Like [`add_days`], but clamps at the calendar limits instead of
/// overflowing when the shift leaves the representable date range.
pub fn saturating_add_days(date: NaiveDate, days: i64) -> NaiveDate {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
}

/// Shift a date by a signed number of weeks.
pub fn add_weeks(date: NaiveDate, weeks: i64) -> NaiveDate {
    date + Duration::weeks(weeks)
}

/// Shift a date by a signed number of calendar months.
///
/// The day-of-month is clamped to the length of the target month, so
/// Jan 31 + 1 month = Feb 28 (Feb 29 in leap years) and Aug 31 + 1 month
/// = Sep 30.
pub fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    let zero_based = date.year() as i64 * 12 + date.month() as i64 - 1 + months;
    let year = zero_based.div_euclid(12) as i32;
    let month = (zero_based.rem_euclid(12) + 1) as u32;
    let day = date.day().min(days_in_month(year, month));

    // The day is clamped to a valid length, so construction cannot fail.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Shift a date by a signed number of calendar years.
///
/// Feb 29 clamps to Feb 28 when the target year is not a leap year.
pub fn add_years(date: NaiveDate, years: i64) -> NaiveDate {
    add_months(date, years * 12)
}

/// Number of days in the given month of the given year.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        _ => 28,
    }
}

/// True for Gregorian leap years.
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Signed, exclusive day difference `b - a`.
///
/// `days_between(Mar 1, Mar 3)` is 2. For the inclusive span of a date
/// range use [`span_days`].
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days()
}

/// Inclusive length of a date range in days.
///
/// A single-day range (`start == end`) spans 1 day.
pub fn span_days(start: NaiveDate, end: NaiveDate) -> i64 {
    days_between(start, end) + 1
}

/// True if the inclusive ranges `[a_start, a_end]` and `[b_start, b_end]`
/// share at least one day.
pub fn overlaps(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    a_start <= b_end && b_start <= a_end
}

/// Format an inclusive date range for display.
///
/// Collapses the month and year when both endpoints share them:
/// `Mar 3 - 9, 2025`, `Mar 28 - Apr 2, 2025`, `Dec 30, 2024 - Jan 2, 2025`.
/// A single-day range renders as a plain date.
pub fn format_range(start: NaiveDate, end: NaiveDate) -> String {
    if start == end {
        return start.format("%b %-d, %Y").to_string();
    }

    if start.year() == end.year() {
        if start.month() == end.month() {
            format!(
                "{} - {}, {}",
                start.format("%b %-d"),
                end.format("%-d"),
                start.year()
            )
        } else {
            format!(
                "{} - {}, {}",
                start.format("%b %-d"),
                end.format("%b %-d"),
                start.year()
            )
        }
    } else {
        format!(
            "{} - {}",
            start.format("%b %-d, %Y"),
            end.format("%b %-d, %Y")
        )
    }
}
