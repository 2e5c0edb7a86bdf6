//! In-memory persistence for tests and local development.
//!
//! Projects and tasks live in one shared store so that deleting a project can
//! cascade to its tasks the same way the database foreign key does.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::domain::{
    GitHubRepoSummary, NewProject, PersistedProjectData, Project, ProjectId, ProjectPatch,
    ProjectWithTasks,
};
use crate::project::ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
use crate::task::domain::Task;

/// Backing state shared between the in-memory project and task repositories.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub(crate) projects: HashMap<i32, Project>,
    pub(crate) tasks: HashMap<i32, Task>,
    pub(crate) next_project_id: i32,
    pub(crate) next_task_id: i32,
}

/// Handle to a shared in-memory store.
pub type SharedStore = Arc<RwLock<InMemoryStore>>;

impl InMemoryStore {
    /// Creates an empty shared store.
    #[must_use]
    pub fn shared() -> SharedStore {
        Arc::new(RwLock::new(Self::default()))
    }

    pub(crate) fn allocate_project_id(&mut self) -> i32 {
        self.next_project_id += 1;
        self.next_project_id
    }

    pub(crate) fn allocate_task_id(&mut self) -> i32 {
        self.next_task_id += 1;
        self.next_task_id
    }

    pub(crate) fn tasks_for(&self, project_id: ProjectId) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| task.project_id() == project_id)
            .cloned()
            .collect();
        tasks.sort_by_key(Task::id);
        tasks
    }
}

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone)]
pub struct InMemoryProjectRepository {
    state: SharedStore,
}

impl InMemoryProjectRepository {
    /// Creates a repository over the given shared store.
    #[must_use]
    pub fn new(state: SharedStore) -> Self {
        Self { state }
    }
}

fn lock_error(err: impl std::fmt::Display) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn apply_patch(project: &Project, patch: ProjectPatch, now: DateTime<Utc>) -> Project {
    Project::from_persisted(PersistedProjectData {
        id: project.id(),
        name: patch.name.unwrap_or_else(|| project.name().to_owned()),
        description: patch
            .description
            .or_else(|| project.description().map(str::to_owned)),
        status: patch.status.unwrap_or_else(|| project.status()),
        github_repos: project.github_repos().map(<[GitHubRepoSummary]>::to_vec),
        created_at: project.created_at(),
        updated_at: now,
    })
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn create(
        &self,
        data: NewProject,
        now: DateTime<Utc>,
    ) -> ProjectRepositoryResult<Project> {
        let mut state = self.state.write().map_err(lock_error)?;
        let id = state.allocate_project_id();
        let project = Project::from_persisted(PersistedProjectData {
            id: ProjectId::new(id),
            name: data.name,
            description: data.description,
            status: data.status,
            github_repos: None,
            created_at: now,
            updated_at: now,
        });
        state.projects.insert(id, project.clone());
        Ok(project)
    }

    async fn list_with_tasks(&self) -> ProjectRepositoryResult<Vec<ProjectWithTasks>> {
        let state = self.state.read().map_err(lock_error)?;
        let mut projects: Vec<Project> = state.projects.values().cloned().collect();
        projects.sort_by_key(Project::id);
        Ok(projects
            .into_iter()
            .map(|project| {
                let tasks = state.tasks_for(project.id());
                ProjectWithTasks { project, tasks }
            })
            .collect())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.projects.get(&id.into_inner()).cloned())
    }

    async fn find_with_tasks(
        &self,
        id: ProjectId,
    ) -> ProjectRepositoryResult<Option<ProjectWithTasks>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.projects.get(&id.into_inner()).cloned().map(|project| {
            let tasks = state.tasks_for(project.id());
            ProjectWithTasks { project, tasks }
        }))
    }

    async fn update(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
        now: DateTime<Utc>,
    ) -> ProjectRepositoryResult<Option<Project>> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(current) = state.projects.get(&id.into_inner()).cloned() else {
            return Ok(None);
        };
        let updated = apply_patch(&current, patch, now);
        state.projects.insert(id.into_inner(), updated.clone());
        Ok(Some(updated))
    }

    async fn set_github_repos(
        &self,
        id: ProjectId,
        repos: &[GitHubRepoSummary],
        now: DateTime<Utc>,
    ) -> ProjectRepositoryResult<Option<Project>> {
        let mut state = self.state.write().map_err(lock_error)?;
        let Some(current) = state.projects.get(&id.into_inner()).cloned() else {
            return Ok(None);
        };
        let updated = Project::from_persisted(PersistedProjectData {
            id: current.id(),
            name: current.name().to_owned(),
            description: current.description().map(str::to_owned),
            status: current.status(),
            github_repos: Some(repos.to_vec()),
            created_at: current.created_at(),
            updated_at: now,
        });
        state.projects.insert(id.into_inner(), updated.clone());
        Ok(Some(updated))
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state.projects.remove(&id.into_inner()).is_some();
        if removed {
            // Mirror the database ON DELETE CASCADE behaviour.
            state.tasks.retain(|_, task| task.project_id() != id);
        }
        Ok(removed)
    }
}
