// Recurrence module
// Repeat rule attached to a seed task when a series is created

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How far apart generated occurrences are.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
    Yearly,
}

impl Frequency {
    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "every 2 weeks",
            Frequency::Monthly => "monthly",
            Frequency::Yearly => "yearly",
        }
    }
}

/// When generation stops.
///
/// `On` is inclusive: an occurrence starting exactly on the date is kept.
/// `After` counts generated occurrences, the seed itself excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceEnd {
    Never,
    On(NaiveDate),
    After(u32),
}

/// A repeat rule: how often, and until when.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    pub frequency: Frequency,
    pub end: RecurrenceEnd,
}

impl RecurrenceRule {
    /// Rule that repeats forever (generation is horizon-bounded).
    pub fn new(frequency: Frequency) -> Self {
        Self {
            frequency,
            end: RecurrenceEnd::Never,
        }
    }

    /// Rule that stops on the given date, inclusive.
    pub fn until(frequency: Frequency, until: NaiveDate) -> Self {
        Self {
            frequency,
            end: RecurrenceEnd::On(until),
        }
    }

    /// Rule that stops after the given number of occurrences.
    pub fn count(frequency: Frequency, count: u32) -> Self {
        Self {
            frequency,
            end: RecurrenceEnd::After(count),
        }
    }

    /// Validate the rule.
    pub fn validate(&self) -> Result<(), String> {
        if let RecurrenceEnd::After(count) = self.end {
            if count == 0 {
                return Err("Recurrence count must be at least 1".to_string());
            }
        }
        Ok(())
    }
}
