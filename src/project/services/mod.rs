//! Service layer for project lifecycle operations.

use crate::project::domain::{NewProject, Project, ProjectId, ProjectPatch, ProjectWithTasks};
use crate::project::ports::{ProjectRepository, ProjectRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// The project does not exist.
    #[error("project not found")]
    NotFound,

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project lifecycle orchestration service.
///
/// The service owns no business rules beyond existence checks; field-level
/// constraints are enforced upstream by request validation.
pub struct ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> ProjectService<R, C>
where
    R: ProjectRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(projects: Arc<R>, clock: Arc<C>) -> Self {
        Self { projects, clock }
    }

    /// Creates a new project and returns it with generated id and timestamps.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence fails.
    pub async fn create(&self, data: NewProject) -> ProjectServiceResult<Project> {
        Ok(self.projects.create(data, self.clock.utc()).await?)
    }

    /// Lists all projects with their tasks eagerly loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when persistence fails.
    pub async fn list(&self) -> ProjectServiceResult<Vec<ProjectWithTasks>> {
        Ok(self.projects.list_with_tasks().await?)
    }

    /// Retrieves a project with its tasks.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist.
    pub async fn get(&self, id: ProjectId) -> ProjectServiceResult<ProjectWithTasks> {
        self.projects
            .find_with_tasks(id)
            .await?
            .ok_or(ProjectServiceError::NotFound)
    }

    /// Applies a partial update to a project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when the project does not
    /// exist.
    pub async fn update(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
    ) -> ProjectServiceResult<Project> {
        self.projects
            .update(id, patch, self.clock.utc())
            .await?
            .ok_or(ProjectServiceError::NotFound)
    }

    /// Deletes a project, cascading to its tasks at the storage layer.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::NotFound`] when nothing was deleted.
    pub async fn remove(&self, id: ProjectId) -> ProjectServiceResult<()> {
        if self.projects.delete(id).await? {
            Ok(())
        } else {
            Err(ProjectServiceError::NotFound)
        }
    }
}
