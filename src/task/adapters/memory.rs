//! In-memory task repository sharing state with the project store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::project::adapters::memory::SharedStore;
use crate::task::domain::{NewTask, PersistedTaskData, Task, TaskId, TaskPatch};
use crate::task::ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

/// Thread-safe in-memory task repository.
///
/// Shares its [`SharedStore`] with
/// [`InMemoryProjectRepository`](crate::project::adapters::memory::InMemoryProjectRepository)
/// so project deletion cascades to tasks.
#[derive(Debug, Clone)]
pub struct InMemoryTaskRepository {
    state: SharedStore,
}

impl InMemoryTaskRepository {
    /// Creates a repository over the given shared store.
    #[must_use]
    pub fn new(state: SharedStore) -> Self {
        Self { state }
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn apply_patch(task: &Task, patch: TaskPatch, now: DateTime<Utc>) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: task.id(),
        project_id: task.project_id(),
        title: patch.title.unwrap_or_else(|| task.title().to_owned()),
        description: patch
            .description
            .or_else(|| task.description().map(str::to_owned)),
        status: patch.status.unwrap_or_else(|| task.status()),
        created_at: task.created_at(),
        updated_at: now,
    })
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, data: NewTask, now: DateTime<Utc>) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(lock_error)?;
        let id = state.allocate_task_id();
        let task = Task::from_persisted(PersistedTaskData {
            id: TaskId::new(id),
            project_id: data.project_id,
            title: data.title,
            description: data.description,
            status: data.status,
            created_at: now,
            updated_at: now,
        });
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn update(
        &self,
        id: TaskId,
        patch: TaskPatch,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(current) = state.tasks.get(&id.into_inner()).cloned() else {
            return Ok(None);
        };
        let updated = apply_patch(&current, patch, now);
        state.tasks.insert(id.into_inner(), updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        Ok(state.tasks.remove(&id.into_inner()).is_some())
    }
}
