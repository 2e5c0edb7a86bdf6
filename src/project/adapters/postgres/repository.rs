//! `PostgreSQL` repository implementation for project storage.

use super::models::{NewProjectRow, ProjectChangeset, ProjectRow};
use crate::db::{projects, tasks, PgPool};
use crate::project::domain::{
    GitHubRepoSummary, NewProject, PersistedProjectData, Project, ProjectId, ProjectPatch,
    ProjectStatus, ProjectWithTasks,
};
use crate::project::ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult};
use crate::task::adapters::postgres::{row_to_task, TaskRow};
use crate::task::domain::Task;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use std::collections::HashMap;

/// `PostgreSQL`-backed project repository.
#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pool: PgPool,
}

impl PostgresProjectRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> ProjectRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> ProjectRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(ProjectRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(ProjectRepositoryError::persistence)?
    }
}

#[async_trait]
impl ProjectRepository for PostgresProjectRepository {
    async fn create(
        &self,
        data: NewProject,
        now: DateTime<Utc>,
    ) -> ProjectRepositoryResult<Project> {
        let new_row = NewProjectRow {
            name: data.name,
            description: data.description,
            status: data.status.as_str().to_owned(),
            created_at: now,
            updated_at: now,
        };
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(projects::table)
                .values(&new_row)
                .get_result::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            row_to_project(row)
        })
        .await
    }

    async fn list_with_tasks(&self) -> ProjectRepositoryResult<Vec<ProjectWithTasks>> {
        self.run_blocking(|connection| {
            let project_rows = projects::table
                .order(projects::id.asc())
                .select(ProjectRow::as_select())
                .load::<ProjectRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            let ids: Vec<i32> = project_rows.iter().map(|row| row.id).collect();
            let task_rows = tasks::table
                .filter(tasks::project_id.eq_any(ids))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;

            let mut tasks_by_project: HashMap<i32, Vec<Task>> = HashMap::new();
            for row in task_rows {
                let task = row_to_task(row).map_err(ProjectRepositoryError::persistence)?;
                tasks_by_project
                    .entry(task.project_id().into_inner())
                    .or_default()
                    .push(task);
            }

            project_rows
                .into_iter()
                .map(|row| {
                    let project = row_to_project(row)?;
                    let tasks = tasks_by_project
                        .remove(&project.id().into_inner())
                        .unwrap_or_default();
                    Ok(ProjectWithTasks { project, tasks })
                })
                .collect()
        })
        .await
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn find_with_tasks(
        &self,
        id: ProjectId,
    ) -> ProjectRepositoryResult<Option<ProjectWithTasks>> {
        self.run_blocking(move |connection| {
            let row = projects::table
                .find(id.into_inner())
                .select(ProjectRow::as_select())
                .first::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            let Some(row) = row else {
                return Ok(None);
            };
            let project = row_to_project(row)?;
            let task_rows = tasks::table
                .filter(tasks::project_id.eq(project.id().into_inner()))
                .order(tasks::id.asc())
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            let tasks = task_rows
                .into_iter()
                .map(|task_row| row_to_task(task_row).map_err(ProjectRepositoryError::persistence))
                .collect::<ProjectRepositoryResult<Vec<Task>>>()?;
            Ok(Some(ProjectWithTasks { project, tasks }))
        })
        .await
    }

    async fn update(
        &self,
        id: ProjectId,
        patch: ProjectPatch,
        now: DateTime<Utc>,
    ) -> ProjectRepositoryResult<Option<Project>> {
        let changeset = ProjectChangeset {
            name: patch.name,
            description: patch.description,
            status: patch.status.map(|status| status.as_str().to_owned()),
            updated_at: now,
        };
        self.run_blocking(move |connection| {
            let row = diesel::update(projects::table.find(id.into_inner()))
                .set(&changeset)
                .get_result::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn set_github_repos(
        &self,
        id: ProjectId,
        repos: &[GitHubRepoSummary],
        now: DateTime<Utc>,
    ) -> ProjectRepositoryResult<Option<Project>> {
        let payload = serde_json::to_value(repos).map_err(ProjectRepositoryError::persistence)?;
        self.run_blocking(move |connection| {
            let row = diesel::update(projects::table.find(id.into_inner()))
                .set((
                    projects::github_repos.eq(Some(payload)),
                    projects::updated_at.eq(now),
                ))
                .get_result::<ProjectRow>(connection)
                .optional()
                .map_err(ProjectRepositoryError::persistence)?;
            row.map(row_to_project).transpose()
        })
        .await
    }

    async fn delete(&self, id: ProjectId) -> ProjectRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            // Tasks go with the project via ON DELETE CASCADE.
            let deleted = diesel::delete(projects::table.find(id.into_inner()))
                .execute(connection)
                .map_err(ProjectRepositoryError::persistence)?;
            Ok(deleted > 0)
        })
        .await
    }
}

fn row_to_project(row: ProjectRow) -> ProjectRepositoryResult<Project> {
    let status = ProjectStatus::try_from(row.status.as_str())
        .map_err(ProjectRepositoryError::persistence)?;
    let github_repos = row
        .github_repos
        .map(serde_json::from_value::<Vec<GitHubRepoSummary>>)
        .transpose()
        .map_err(ProjectRepositoryError::persistence)?;
    Ok(Project::from_persisted(PersistedProjectData {
        id: ProjectId::new(row.id),
        name: row.name,
        description: row.description,
        status,
        github_repos,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}
