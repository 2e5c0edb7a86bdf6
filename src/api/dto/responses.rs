//! Response bodies; all field names serialise in camelCase.

use crate::github::services::AttachedRepos;
use crate::project::domain::{
    GitHubRepoSummary, Project, ProjectId, ProjectStatus, ProjectWithTasks,
};
use crate::task::domain::{Task, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A task as returned by the API.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponse {
    /// Task identifier.
    pub id: TaskId,
    /// Owning project identifier.
    pub project_id: ProjectId,
    /// Task title.
    pub title: String,
    /// Task description, if any.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl TaskResponse {
    /// Builds the response body from a domain task.
    #[must_use]
    pub fn from_domain(task: &Task) -> Self {
        Self {
            id: task.id(),
            project_id: task.project_id(),
            title: task.title().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            status: task.status(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// A project as returned by the API.
///
/// `githubRepos` is always present (null until a snapshot is attached);
/// `tasks` appears only on endpoints that eager-load them.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectResponse {
    /// Project identifier.
    pub id: ProjectId,
    /// Project name.
    pub name: String,
    /// Project description, if any.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: ProjectStatus,
    /// Attached repository snapshot, null until attached.
    pub github_repos: Option<Vec<GitHubRepoSummary>>,
    /// Owned tasks, present only on eager-loading endpoints.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<TaskResponse>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl ProjectResponse {
    /// Builds the response body from a domain project, without tasks.
    #[must_use]
    pub fn from_domain(project: &Project) -> Self {
        Self {
            id: project.id(),
            name: project.name().to_owned(),
            description: project.description().map(ToOwned::to_owned),
            status: project.status(),
            github_repos: project.github_repos().map(<[GitHubRepoSummary]>::to_vec),
            tasks: None,
            created_at: project.created_at(),
            updated_at: project.updated_at(),
        }
    }

    /// Builds the response body with the project's tasks nested.
    #[must_use]
    pub fn with_tasks(record: &ProjectWithTasks) -> Self {
        let mut body = Self::from_domain(&record.project);
        body.tasks = Some(record.tasks.iter().map(TaskResponse::from_domain).collect());
        body
    }
}

/// Body of a successful repository attach.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachResponse {
    /// The project the snapshot was attached to.
    pub project_id: ProjectId,
    /// The GitHub username the snapshot was taken from.
    pub username: String,
    /// The persisted repositories, most recently updated first.
    pub repos: Vec<GitHubRepoSummary>,
}

impl From<AttachedRepos> for AttachResponse {
    fn from(attached: AttachedRepos) -> Self {
        Self {
            project_id: attached.project_id,
            username: attached.username,
            repos: attached.repos,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Fixed liveness marker.
    pub status: &'static str,
}

impl HealthResponse {
    /// The canonical "service is up" body.
    #[must_use]
    pub const fn ok() -> Self {
        Self { status: "ok" }
    }
}
