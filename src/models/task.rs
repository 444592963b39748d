/// Task model
///
/// Tasks belong to a single user and move freely between the three
/// statuses below. There is no enforced transition graph: any status is
/// reachable from any other through an update. That is a deliberate
/// choice (free-form status editing on the client), not an omission.
///
/// # Example
///
/// ```
/// use tasklight::models::task::{CreateTask, Task, TaskStatus, UpdateTask};
/// use uuid::Uuid;
///
/// let task = Task::new(CreateTask {
///     user_id: Uuid::new_v4(),
///     title: "Write docs".to_string(),
///     description: "Module-level docs for the store".to_string(),
///     status: TaskStatus::Todo,
/// });
///
/// let mut task = task;
/// UpdateTask {
///     status: Some(TaskStatus::Completed),
///     ..Default::default()
/// }
/// .apply(&mut task);
///
/// assert_eq!(task.status, TaskStatus::Completed);
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Task status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Todo,

    /// Being worked on
    InProgress,

    /// Done
    Completed,
}

impl TaskStatus {
    /// Storage/wire representation of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
        }
    }
}

/// A task owned by a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task ID (UUID v4)
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// Short title
    pub title: String,

    /// Longer free-form description
    pub description: String,

    /// Current status
    pub status: TaskStatus,

    /// When the task was created
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Builds a new task with a fresh id and creation timestamp
    pub fn new(data: CreateTask) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            title: data.title,
            description: data.description,
            status: data.status,
            created_at: Utc::now(),
        }
    }
}

/// Input for creating a task
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    /// Owning user; must reference a stored user
    pub user_id: Uuid,

    /// Short title
    pub title: String,

    /// Longer free-form description
    pub description: String,

    /// Initial status (defaults to `todo`)
    #[serde(default)]
    pub status: TaskStatus,
}

/// Partial task update
///
/// Only non-`None` fields are applied; everything else is left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,
}

impl UpdateTask {
    /// Shallow-merges this update into `task`
    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}

/// Per-status task counts, as shown on the client's summary tiles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    /// Tasks in `todo`
    pub todo: usize,

    /// Tasks in `in-progress`
    pub in_progress: usize,

    /// Tasks in `completed`
    pub completed: usize,
}

/// Counts tasks by status
pub fn status_counts(tasks: &[Task]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for task in tasks {
        match task.status {
            TaskStatus::Todo => counts.todo += 1,
            TaskStatus::InProgress => counts.in_progress += 1,
            TaskStatus::Completed => counts.completed += 1,
        }
    }
    counts
}
