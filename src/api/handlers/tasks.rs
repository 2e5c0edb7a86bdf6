//! Handlers for task routes.

use crate::api::dto::requests::{CreateTaskRequest, UpdateTaskRequest};
use crate::api::dto::responses::TaskResponse;
use crate::api::error::ApiError;
use crate::api::extract::ApiJson;
use crate::api::state::AppState;
use crate::api::validation::positive_id;
use crate::github::ports::GitHubGateway;
use crate::project::domain::ProjectId;
use crate::project::ports::ProjectRepository;
use crate::task::domain::TaskId;
use crate::task::ports::TaskRepository;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use mockable::Clock;

fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    positive_id("id", raw)
        .map(TaskId::new)
        .map_err(|err| ApiError::validation(vec![err]))
}

/// `POST /projects/{id}/tasks`
pub async fn create_task<PR, TR, G, C>(
    State(state): State<AppState<PR, TR, G, C>>,
    Path(project_id): Path<String>,
    ApiJson(body): ApiJson<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError>
where
    PR: ProjectRepository + 'static,
    TR: TaskRepository + 'static,
    G: GitHubGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    let project_id = positive_id("id", &project_id)
        .map(ProjectId::new)
        .map_err(|err| ApiError::validation(vec![err]))?;
    let data = body.validate().map_err(ApiError::validation)?;
    let task = state.tasks.create(project_id, data).await?;
    Ok((StatusCode::CREATED, Json(TaskResponse::from_domain(&task))))
}

/// `PUT /tasks/{id}`
pub async fn update_task<PR, TR, G, C>(
    State(state): State<AppState<PR, TR, G, C>>,
    Path(id): Path<String>,
    ApiJson(body): ApiJson<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, ApiError>
where
    PR: ProjectRepository + 'static,
    TR: TaskRepository + 'static,
    G: GitHubGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_task_id(&id)?;
    let patch = body.validate().map_err(ApiError::validation)?;
    let task = state.tasks.update(id, patch).await?;
    Ok(Json(TaskResponse::from_domain(&task)))
}

/// `DELETE /tasks/{id}`
pub async fn remove_task<PR, TR, G, C>(
    State(state): State<AppState<PR, TR, G, C>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError>
where
    PR: ProjectRepository + 'static,
    TR: TaskRepository + 'static,
    G: GitHubGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    let id = parse_task_id(&id)?;
    state.tasks.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
