//! Handlers for the `/projects` resource, including the GitHub attach route.

use crate::api::dto::requests::{CreateProjectRequest, UpdateProjectRequest};
use crate::api::dto::responses::{AttachResponse, ProjectResponse};
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::api::validation::{github_username, positive_id};
use crate::github::ports::GitHubGateway;
use crate::project::domain::ProjectId;
use crate::project::ports::ProjectRepository;
use crate::task::ports::TaskRepository;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mockable::Clock;

/// Parses a `{id}` path segment into a project id.
fn parse_project_id(raw: &str) -> Result<ProjectId, ApiError> {
    positive_id("id", raw)
        .map(ProjectId::new)
        .map_err(|err| ApiError::validation(vec![err]))
}

/// `POST /projects`
pub async fn create_project<PR, TR, G, C>(
    State(state): State<AppState<PR, TR, G, C>>,
    ApiJson(body): ApiJson<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), ApiError>
where
    PR: ProjectRepository + 'static,
    TR: TaskRepository + 'static,
    G: GitHubGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    let data = body.validate().map_err(ApiError::validation)?;
    let project = state.projects.create(data).await?;
    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse::from_domain(&project)),
    ))
}

/// `GET /projects`
pub async fn list_projects<PR, TR, G, C>(
    State(state): State<AppState<PR, TR, G, C>>,
) -> Result<Json<Vec<ProjectResponse>>, ApiError>
where
    PR: ProjectRepository + 'static,
    TR: TaskRepository + 'static,
    G: GitHubGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    let projects = state.projects.list().await?;
    let body = projects.iter().map(ProjectResponse::with_tasks).collect();
    Ok(Json(body))
}

/// `GET /projects/{id}`
pub async fn get_project<PR, TR, G, C>(
    State(state): State<AppState<PR, TR, G, C>>,
    Path(id): Path<String>,
) -> Result<Json<ProjectResponse>, ApiError>
where
    PR: ProjectRepository + 'static,
    TR: TaskRepository + 'static,
    G: GitHubGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_project_id(&id)?;
    let record = state.projects.get(id).await?;
    Ok(Json(ProjectResponse::with_tasks(&record)))
}

/// `PUT /projects/{id}`
pub async fn update_project<PR, TR, G, C>(
    State(state): State<AppState<PR, TR, G, C>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, ApiError>
where
    PR: ProjectRepository + 'static,
    TR: TaskRepository + 'static,
    G: GitHubGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_project_id(&id)?;
    let patch = body.validate().map_err(ApiError::validation)?;
    let project = state.projects.update(id, patch).await?;
    Ok(Json(ProjectResponse::from_domain(&project)))
}

/// `DELETE /projects/{id}`
pub async fn remove_project<PR, TR, G, C>(
    State(state): State<AppState<PR, TR, G, C>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    PR: ProjectRepository + 'static,
    TR: TaskRepository + 'static,
    G: GitHubGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_project_id(&id)?;
    state.projects.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /projects/{id}/github/{username}`
pub async fn attach_github_repos<PR, TR, G, C>(
    State(state): State<AppState<PR, TR, G, C>>,
    Path((id, username)): Path<(String, String)>,
) -> Result<Json<AttachResponse>, ApiError>
where
    PR: ProjectRepository + 'static,
    TR: TaskRepository + 'static,
    G: GitHubGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_project_id(&id)?;
    github_username("username", &username).map_err(|err| ApiError::validation(vec![err]))?;
    let attached = state.github.attach(id, &username).await?;
    Ok(Json(AttachResponse::from(attached)))
}
