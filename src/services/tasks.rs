/// Task service
///
/// CRUD over the task collection, scoped to a user. Each operation reads
/// the whole `app_tasks` bucket, mutates a local copy, writes it back,
/// and resolves through the simulated network delay.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use tasklight::api::MockApi;
/// use tasklight::models::task::{CreateTask, TaskStatus, UpdateTask};
/// use tasklight::services::TaskService;
/// use tasklight::store::MemoryStore;
/// use uuid::Uuid;
///
/// # async fn example(user_id: Uuid) -> tasklight::error::ServiceResult<()> {
/// let tasks = TaskService::new(Arc::new(MemoryStore::new()), MockApi::default());
///
/// let created = tasks
///     .create(CreateTask {
///         user_id,
///         title: "Ship it".to_string(),
///         description: String::new(),
///         status: TaskStatus::Todo,
///     })
///     .await?;
///
/// tasks
///     .update(
///         created.data.id,
///         UpdateTask {
///             status: Some(TaskStatus::Completed),
///             ..Default::default()
///         },
///     )
///     .await?;
/// # Ok(())
/// # }
/// ```
use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::api::{MockApi, Response};
use crate::error::{ServiceError, ServiceResult};
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::models::user::User;
use crate::store::{self, keys, Store};

/// Service managing the per-user task collection
#[derive(Clone)]
pub struct TaskService {
    store: Arc<dyn Store>,
    api: MockApi,
}

impl TaskService {
    /// Creates a service over the given store
    pub fn new(store: Arc<dyn Store>, api: MockApi) -> Self {
        Self { store, api }
    }

    /// Lists all tasks owned by `user_id`, in storage (insertion) order
    ///
    /// No pagination and no sorting beyond insertion order.
    pub async fn list(&self, user_id: Uuid) -> ServiceResult<Response<Vec<Task>>> {
        let outcome = self.try_list(user_id);
        self.api.call(outcome).await
    }

    fn try_list(&self, user_id: Uuid) -> ServiceResult<Vec<Task>> {
        let tasks: Vec<Task> = self
            .read_tasks()?
            .into_iter()
            .filter(|t| t.user_id == user_id)
            .collect();
        debug!(%user_id, count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Creates a task
    ///
    /// Assigns a fresh id and creation timestamp and appends the task to
    /// the stored collection.
    ///
    /// # Errors
    ///
    /// `ServiceError::UnknownUser` when `data.user_id` does not reference
    /// a stored user.
    pub async fn create(&self, data: CreateTask) -> ServiceResult<Response<Task>> {
        let outcome = self.try_create(data);
        self.api.call(outcome).await
    }

    fn try_create(&self, data: CreateTask) -> ServiceResult<Task> {
        let users: Vec<User> =
            store::read_json(self.store.as_ref(), keys::USERS)?.unwrap_or_default();
        if !users.iter().any(|u| u.id == data.user_id) {
            return Err(ServiceError::UnknownUser(data.user_id));
        }

        let task = Task::new(data);
        let mut tasks = self.read_tasks()?;
        tasks.push(task.clone());
        store::write_json(self.store.as_ref(), keys::TASKS, &tasks)?;

        info!(task_id = %task.id, user_id = %task.user_id, "created task");
        Ok(task)
    }

    /// Applies a partial update to the task with the given id
    ///
    /// Shallow-merges `updates` into the stored record: only the fields
    /// present in `updates` change. Status edits are free-form; any
    /// status may follow any other.
    ///
    /// # Errors
    ///
    /// `ServiceError::TaskNotFound` when no task has that id; delivered
    /// after the same delay as a success.
    pub async fn update(&self, id: Uuid, updates: UpdateTask) -> ServiceResult<Response<Task>> {
        let outcome = self.try_update(id, updates);
        self.api.call(outcome).await
    }

    fn try_update(&self, id: Uuid, updates: UpdateTask) -> ServiceResult<Task> {
        let mut tasks = self.read_tasks()?;
        let Some(task) = tasks.iter_mut().find(|t| t.id == id) else {
            return Err(ServiceError::TaskNotFound);
        };

        updates.apply(task);
        let updated = task.clone();
        store::write_json(self.store.as_ref(), keys::TASKS, &tasks)?;

        info!(task_id = %id, status = updated.status.as_str(), "updated task");
        Ok(updated)
    }

    /// Deletes the task with the given id
    ///
    /// Idempotent: deleting an absent id succeeds and leaves the
    /// collection unchanged. Resolves to a success marker either way.
    pub async fn delete(&self, id: Uuid) -> ServiceResult<Response<()>> {
        let outcome = self.try_delete(id);
        self.api.call(outcome).await
    }

    fn try_delete(&self, id: Uuid) -> ServiceResult<()> {
        let mut tasks = self.read_tasks()?;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);

        store::write_json(self.store.as_ref(), keys::TASKS, &tasks)?;

        if tasks.len() < before {
            info!(task_id = %id, "deleted task");
        } else {
            debug!(task_id = %id, "delete of absent task ignored");
        }
        Ok(())
    }

    fn read_tasks(&self) -> ServiceResult<Vec<Task>> {
        Ok(store::read_json(self.store.as_ref(), keys::TASKS)?.unwrap_or_default())
    }
}
