//! Repository port for project persistence and lookup.

use crate::project::domain::{
    GitHubRepoSummary, NewProject, Project, ProjectId, ProjectPatch, ProjectWithTasks,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
///
/// The repository is a thin wrapper over storage: it carries no business
/// rules. Absence is reported through `Option`/`bool` return values and
/// translated into tagged errors by the service layer.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Inserts a new project row and returns it with its generated id.
    async fn create(
        &self,
        data: NewProject,
        now: DateTime<Utc>,
    ) -> ProjectRepositoryResult<Project>;

    /// Returns all projects with their tasks eagerly loaded.
    async fn list_with_tasks(&self) -> ProjectRepositoryResult<Vec<ProjectWithTasks>>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Finds a project with its tasks eagerly loaded.
    async fn find_with_tasks(
        &self,
        id: ProjectId,
    ) -> ProjectRepositoryResult<Option<ProjectWithTasks>>;

    /// Applies a partial update and bumps `updated_at`.
    ///
    /// Returns `None` when the project does not exist.
    async fn update(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
        now: DateTime<Utc>,
    ) -> ProjectRepositoryResult<Option<Project>>;

    /// Overwrites the attached repository snapshot wholesale.
    ///
    /// Returns `None` when the project does not exist.
    async fn set_github_repos(
        &self,
        id: ProjectId,
        repos: &[GitHubRepoSummary],
        now: DateTime<Utc>,
    ) -> ProjectRepositoryResult<Option<Project>>;

    /// Deletes a project by identifier, cascading to its tasks.
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
