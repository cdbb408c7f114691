//! Recurring task service entry point.
//! Expands a seed task and a repeat rule into the ordered batch of sibling
//! tasks to insert, and resolves which series members a scoped edit or
//! delete touches.

pub mod scope;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::recurrence::{Frequency, RecurrenceEnd, RecurrenceRule};
use crate::models::task::{RepeatId, Task, TaskId};
use crate::utils::date::{
    add_days, add_months, add_weeks, add_years, days_between, saturating_add_days,
};

/// Generation never emits more than this many siblings, whatever the rule
/// says. Guarantees termination even under a malformed rule.
pub const MAX_OCCURRENCES: usize = 500;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecurrenceError {
    /// The rule failed validation; nothing was generated.
    #[error("invalid recurrence rule: {0}")]
    InvalidRule(String),
    /// A well-formed rule admits no occurrence after the seed.
    #[error("no occurrences between {seed_start} and {bound}")]
    NoOccurrences {
        seed_start: NaiveDate,
        bound: NaiveDate,
    },
}

/// Start date of occurrence `index`, stepped from the seed.
///
/// Every occurrence is computed directly from the seed's start scaled by
/// its index, so month-end clamping never compounds: a Jan 31 monthly
/// series clamps to February's last day but lands back on Mar 31, not
/// on Mar 28.
fn occurrence_start(seed_start: NaiveDate, frequency: Frequency, index: i64) -> NaiveDate {
    match frequency {
        Frequency::Daily => add_days(seed_start, index),
        Frequency::Weekly => add_weeks(seed_start, index),
        Frequency::Biweekly => add_weeks(seed_start, 2 * index),
        Frequency::Monthly => add_months(seed_start, index),
        Frequency::Yearly => add_years(seed_start, index),
    }
}

/// Expand a seed task into the siblings a repeat rule derives from it.
///
/// The seed itself is occurrence index 0 and is never re-emitted. Each
/// sibling copies the seed's payload fields, keeps its duration, gets a
/// fresh id, and carries the series' repeat id. The batch comes back
/// ordered by start date and is meant to be inserted all-or-nothing.
pub fn generate(
    seed: &Task,
    repeat_id: RepeatId,
    rule: &RecurrenceRule,
    never_horizon_days: i64,
) -> Result<Vec<Task>, RecurrenceError> {
    rule.validate().map_err(RecurrenceError::InvalidRule)?;

    let duration_days = days_between(seed.start_date, seed.end_date);
    // The horizon is config-sourced and may sit past the calendar limit.
    let horizon = saturating_add_days(seed.start_date, never_horizon_days);
    let mut occurrences = Vec::new();

    let mut index: i64 = 1;
    while occurrences.len() < MAX_OCCURRENCES {
        if let RecurrenceEnd::After(count) = rule.end {
            if index > i64::from(count) {
                break;
            }
        }

        let next_start = occurrence_start(seed.start_date, rule.frequency, index);
        match rule.end {
            RecurrenceEnd::On(until) if next_start > until => break,
            RecurrenceEnd::Never if next_start > horizon => break,
            _ => {}
        }

        let mut occurrence = seed.clone();
        occurrence.id = TaskId::new();
        occurrence.repeat_id = Some(repeat_id);
        occurrence.start_date = next_start;
        occurrence.end_date = add_days(next_start, duration_days);
        occurrences.push(occurrence);

        index += 1;
    }

    if occurrences.is_empty() {
        let bound = match rule.end {
            RecurrenceEnd::On(until) => until,
            _ => horizon,
        };
        return Err(RecurrenceError::NoOccurrences {
            seed_start: seed.start_date,
            bound,
        });
    }

    if occurrences.len() == MAX_OCCURRENCES {
        log::warn!(
            "Series {} stopped at the {} occurrence cap",
            repeat_id,
            MAX_OCCURRENCES
        );
    }
    log::info!(
        "Generated {} {} occurrences for series {}",
        occurrences.len(),
        rule.frequency.label(),
        repeat_id
    );
    Ok(occurrences)
}
