//! Service layer for task lifecycle operations.

use crate::project::domain::ProjectId;
use crate::project::ports::{ProjectRepository, ProjectRepositoryError};
use crate::task::domain::{NewTask, Task, TaskId, TaskPatch, TaskStatus};
use crate::task::ports::{TaskRepository, TaskRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Payload for creating a task; the owning project id travels separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Initial status.
    pub status: TaskStatus,
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The referenced project does not exist.
    #[error("project not found")]
    ProjectNotFound,

    /// The task does not exist.
    #[error("task not found")]
    NotFound,

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Project repository operation failed during the existence check.
    #[error(transparent)]
    ProjectRepository(#[from] ProjectRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task lifecycle orchestration service.
pub struct TaskService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    clock: Arc<C>,
}

impl<T, P, C> Clone for TaskService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            projects: Arc::clone(&self.projects),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<T, P, C> TaskService<T, P, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            clock,
        }
    }

    /// Creates a task under an existing project.
    ///
    /// The project is looked up explicitly before the insert, redundantly
    /// with the storage-layer foreign key, so a missing project surfaces as a
    /// domain error rather than a constraint violation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProjectNotFound`] when the project does
    /// not exist; no task row is inserted in that case.
    pub async fn create(
        &self,
        project_id: ProjectId,
        data: NewTaskData,
    ) -> TaskServiceResult<Task> {
        let project = self.projects.find_by_id(project_id).await?;
        if project.is_none() {
            return Err(TaskServiceError::ProjectNotFound);
        }
        let new_task = NewTask {
            project_id,
            title: data.title,
            description: data.description,
            status: data.status,
        };
        Ok(self.tasks.create(new_task, self.clock.utc()).await?)
    }

    /// Applies a partial update to a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when the task does not exist.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskServiceResult<Task> {
        self.tasks
            .update(id, patch, self.clock.utc())
            .await?
            .ok_or(TaskServiceError::NotFound)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::NotFound`] when nothing was deleted.
    pub async fn remove(&self, id: TaskId) -> TaskServiceResult<()> {
        if self.tasks.delete(id).await? {
            Ok(())
        } else {
            Err(TaskServiceError::NotFound)
        }
    }
}
