// Task module
// Scheduling unit rendered on the shared team timeline

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::date::{overlaps, span_days};

macro_rules! id_type {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Mint a fresh random identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

id_type!(
    /// Stable identifier of a task record.
    TaskId
);
id_type!(
    /// Identifier shared by every task generated from one recurrence request.
    RepeatId
);
id_type!(
    /// Workspace member referenced by task assignments.
    MemberId
);
id_type!(
    /// Project a task belongs to.
    ProjectId
);

/// Workflow state; opaque payload as far as scheduling is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Planned,
    InProgress,
    Done,
}

/// Task flavor; opaque payload as far as scheduling is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    #[default]
    Task,
    Milestone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// A date-ranged unit of work on the team timeline.
///
/// `start_date` and `end_date` form an inclusive day range and
/// `start_date <= end_date` holds after every mutation; the constructors
/// and [`TaskBuilder`] enforce it up front, the drag translator clamps,
/// and the record store re-validates on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub kind: TaskKind,
    pub priority: Option<TaskPriority>,
    pub tags: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub assignee_ids: Vec<MemberId>,
    pub project_id: Option<ProjectId>,
    pub repeat_id: Option<RepeatId>,
}

impl Task {
    /// Create a task with the required fields and a fresh id.
    ///
    /// # Arguments
    /// * `title` - Task title (required, non-empty)
    /// * `start_date` - First day of the task, inclusive
    /// * `end_date` - Last day of the task, inclusive
    ///
    /// # Examples
    /// ```
    /// use timeline_planner::models::task::Task;
    /// use chrono::NaiveDate;
    ///
    /// let start = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
    /// let task = Task::new("Design review", start, start).unwrap();
    /// assert_eq!(task.duration_days(), 1);
    /// ```
    pub fn new(
        title: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Self, String> {
        let task = Self {
            id: TaskId::new(),
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            kind: TaskKind::default(),
            priority: None,
            tags: Vec::new(),
            start_date,
            end_date,
            assignee_ids: Vec::new(),
            project_id: None,
            repeat_id: None,
        };

        task.validate()?;
        Ok(task)
    }

    /// Create a builder for constructing tasks with optional fields.
    pub fn builder() -> TaskBuilder {
        TaskBuilder::new()
    }

    /// Validate the task.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Task title cannot be empty".to_string());
        }

        if self.start_date > self.end_date {
            return Err("Task start date must not be after its end date".to_string());
        }

        let mut seen = Vec::with_capacity(self.assignee_ids.len());
        for id in &self.assignee_ids {
            if seen.contains(id) {
                return Err("Task assignees must be unique".to_string());
            }
            seen.push(*id);
        }

        Ok(())
    }

    /// Check whether this task is part of a recurring series.
    pub fn is_repeating(&self) -> bool {
        self.repeat_id.is_some()
    }

    /// Inclusive length of the task in days (a single-day task spans 1).
    pub fn duration_days(&self) -> i64 {
        span_days(self.start_date, self.end_date)
    }

    /// True if the task touches any day of the inclusive window.
    pub fn overlaps_window(&self, window_start: NaiveDate, window_end: NaiveDate) -> bool {
        overlaps(self.start_date, self.end_date, window_start, window_end)
    }

    pub fn assigned_to(&self, member: MemberId) -> bool {
        self.assignee_ids.contains(&member)
    }
}

/// Builder for creating tasks with optional fields.
pub struct TaskBuilder {
    title: Option<String>,
    description: Option<String>,
    status: TaskStatus,
    kind: TaskKind,
    priority: Option<TaskPriority>,
    tags: Vec<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    assignee_ids: Vec<MemberId>,
    project_id: Option<ProjectId>,
    repeat_id: Option<RepeatId>,
}

impl TaskBuilder {
    pub fn new() -> Self {
        Self {
            title: None,
            description: None,
            status: TaskStatus::default(),
            kind: TaskKind::default(),
            priority: None,
            tags: Vec::new(),
            start_date: None,
            end_date: None,
            assignee_ids: Vec::new(),
            project_id: None,
            repeat_id: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn kind(mut self, kind: TaskKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Add an assignee; repeated ids are ignored (set semantics).
    pub fn assignee(mut self, member: MemberId) -> Self {
        if !self.assignee_ids.contains(&member) {
            self.assignee_ids.push(member);
        }
        self
    }

    pub fn project(mut self, project: ProjectId) -> Self {
        self.project_id = Some(project);
        self
    }

    pub fn repeat_id(mut self, repeat_id: RepeatId) -> Self {
        self.repeat_id = Some(repeat_id);
        self
    }

    /// Build the task.
    pub fn build(self) -> Result<Task, String> {
        let title = self.title.ok_or("Task title is required")?;
        let start_date = self.start_date.ok_or("Task start date is required")?;
        let end_date = self.end_date.ok_or("Task end date is required")?;

        let task = Task {
            id: TaskId::new(),
            title,
            description: self.description,
            status: self.status,
            kind: self.kind,
            priority: self.priority,
            tags: self.tags,
            start_date,
            end_date,
            assignee_ids: self.assignee_ids,
            project_id: self.project_id,
            repeat_id: self.repeat_id,
        };

        task.validate()?;
        Ok(task)
    }
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial field edit applied through the record store.
///
/// `None` fields are left unchanged. Date fields are only ever set by the
/// drag commit path; series-scoped edits carry descriptive fields only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub kind: Option<TaskKind>,
    pub priority: Option<TaskPriority>,
    pub tags: Option<Vec<String>>,
    pub assignee_ids: Option<Vec<MemberId>>,
    pub project_id: Option<ProjectId>,
    pub repeat_id: Option<RepeatId>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl TaskPatch {
    /// A patch that reschedules the task and changes nothing else.
    pub fn reschedule(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date: Some(start_date),
            end_date: Some(end_date),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True when the patch touches the task's date range.
    pub fn touches_dates(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }

    /// Apply the patch to a task in place.
    pub fn apply(&self, task: &mut Task) {
        if let Some(ref title) = self.title {
            task.title = title.clone();
        }
        if let Some(ref description) = self.description {
            task.description = Some(description.clone());
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(kind) = self.kind {
            task.kind = kind;
        }
        if let Some(priority) = self.priority {
            task.priority = Some(priority);
        }
        if let Some(ref tags) = self.tags {
            task.tags = tags.clone();
        }
        if let Some(ref assignees) = self.assignee_ids {
            task.assignee_ids = assignees.clone();
        }
        if let Some(project) = self.project_id {
            task.project_id = Some(project);
        }
        if let Some(repeat_id) = self.repeat_id {
            task.repeat_id = Some(repeat_id);
        }
        if let Some(start_date) = self.start_date {
            task.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            task.end_date = end_date;
        }
    }
}
