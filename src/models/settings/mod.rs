// Settings module
// Tunables shared by layout, drag translation, and recurrence generation

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Which field the timeline groups rows by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Member,
    Project,
}

/// First day of the rendered week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn to_weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

/// Upper bound for [`PlannerSettings::never_horizon_days`], one century.
pub const MAX_NEVER_HORIZON_DAYS: i64 = 36_500;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSettings {
    /// Width of one day column in pixels.
    pub day_column_px: f32,
    /// Fraction of a day column the pointer must travel before a drag
    /// snaps to the next day. 0.5 means round to nearest.
    pub snap_threshold: f32,
    /// Generation horizon for rules that never end, in days past the seed.
    pub never_horizon_days: i64,
    pub group_by: GroupBy,
    pub week_start: WeekStart,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            day_column_px: 36.0,
            snap_threshold: 0.5,
            never_horizon_days: 365,
            group_by: GroupBy::default(),
            week_start: WeekStart::default(),
        }
    }
}

impl PlannerSettings {
    /// Validate the settings.
    pub fn validate(&self) -> Result<(), String> {
        if !self.day_column_px.is_finite() || self.day_column_px <= 0.0 {
            return Err("Day column width must be positive".to_string());
        }
        if !self.snap_threshold.is_finite()
            || !(0.0..=1.0).contains(&self.snap_threshold)
        {
            return Err("Snap threshold must be between 0 and 1".to_string());
        }
        if self.never_horizon_days < 1 {
            return Err("Repeat horizon must be at least 1 day".to_string());
        }
        if self.never_horizon_days > MAX_NEVER_HORIZON_DAYS {
            return Err(format!(
                "Repeat horizon must be at most {} days",
                MAX_NEVER_HORIZON_DAYS
            ));
        }
        Ok(())
    }
}
