// Test fixtures - reusable test data
// Provides consistent test data across all test files

#![allow(dead_code)]

use chrono::NaiveDate;

use timeline_planner::models::task::{MemberId, ProjectId, Task};

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    /// Returns Jan 1, 2024 (leap year)
    pub fn jan_1_2024() -> NaiveDate {
        ymd(2024, 1, 1)
    }

    /// Returns Jan 31, 2024, a month-end seed for clamping cases
    pub fn jan_31_2024() -> NaiveDate {
        ymd(2024, 1, 31)
    }

    /// Returns Mar 1, 2025, the start of the usual test window
    pub fn window_start() -> NaiveDate {
        ymd(2025, 3, 1)
    }

    /// Returns Mar 31, 2025, the end of the usual test window
    pub fn window_end() -> NaiveDate {
        ymd(2025, 3, 31)
    }
}

/// Sample tasks for testing
pub mod tasks {
    use super::*;

    /// Creates a plain task spanning the given dates
    pub fn task(title: &str, start: NaiveDate, end: NaiveDate) -> Task {
        Task::new(title, start, end).unwrap()
    }

    /// Creates a single-day task
    pub fn single_day(title: &str, date: NaiveDate) -> Task {
        task(title, date, date)
    }

    /// Creates a task assigned to one member
    pub fn assigned(title: &str, start: NaiveDate, end: NaiveDate, member: MemberId) -> Task {
        let mut t = task(title, start, end);
        t.assignee_ids = vec![member];
        t
    }

    /// Creates a task filed under a project
    pub fn in_project(title: &str, start: NaiveDate, end: NaiveDate, project: ProjectId) -> Task {
        let mut t = task(title, start, end);
        t.project_id = Some(project);
        t
    }

    /// Creates a trio of mutually overlapping tasks, all within March 2025
    pub fn overlapping_trio() -> Vec<Task> {
        vec![
            task("first", dates::ymd(2025, 3, 3), dates::ymd(2025, 3, 10)),
            task("second", dates::ymd(2025, 3, 5), dates::ymd(2025, 3, 12)),
            task("third", dates::ymd(2025, 3, 8), dates::ymd(2025, 3, 9)),
        ]
    }
}
