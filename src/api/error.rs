//! Central HTTP error type and service-error mappings.

use crate::github::ports::GitHubGatewayError;
use crate::github::services::GitHubAttachError;
use crate::project::services::ProjectServiceError;
use crate::task::services::TaskServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// The offending request field.
    pub field: String,
    /// Why the value was rejected.
    pub message: String,
}

impl FieldError {
    /// Creates a field error.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Error response produced by every handler.
///
/// Serialises as `{"error": "..."}`, with a `details` array of field errors
/// when validation failed.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    details: Option<Vec<FieldError>>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a [FieldError]>,
}

impl ApiError {
    /// 400 with a plain message (malformed body, unparseable input).
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    /// 400 with field-level detail.
    #[must_use]
    pub fn validation(details: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "validation failed".to_owned(),
            details: Some(details),
        }
    }

    /// 404 with an entity-specific message.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            details: None,
        }
    }

    /// 429 for rate-limited requests.
    #[must_use]
    pub fn too_many_requests() -> Self {
        Self {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: "too many requests".to_owned(),
            details: None,
        }
    }

    /// 500 with a generic message; specifics stay in the logs.
    #[must_use]
    pub fn internal() -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: "internal server error".to_owned(),
            details: None,
        }
    }

    /// Propagates an upstream GitHub status unmodified.
    #[must_use]
    pub fn upstream(status: u16) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: "github request failed".to_owned(),
            details: None,
        }
    }

    /// Returns the response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: &self.message,
            details: self.details.as_deref(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ProjectServiceError> for ApiError {
    fn from(err: ProjectServiceError) -> Self {
        match err {
            ProjectServiceError::NotFound => Self::not_found("project not found"),
            ProjectServiceError::Repository(source) => {
                tracing::error!(error = %source, "project repository failure");
                Self::internal()
            }
        }
    }
}

impl From<TaskServiceError> for ApiError {
    fn from(err: TaskServiceError) -> Self {
        match err {
            TaskServiceError::ProjectNotFound => Self::not_found("project not found"),
            TaskServiceError::NotFound => Self::not_found("task not found"),
            TaskServiceError::Repository(source) => {
                tracing::error!(error = %source, "task repository failure");
                Self::internal()
            }
            TaskServiceError::ProjectRepository(source) => {
                tracing::error!(error = %source, "project repository failure");
                Self::internal()
            }
        }
    }
}

impl From<GitHubAttachError> for ApiError {
    fn from(err: GitHubAttachError) -> Self {
        match err {
            GitHubAttachError::ProjectNotFound => Self::not_found("project not found"),
            GitHubAttachError::Gateway(GitHubGatewayError::UpstreamStatus { status }) => {
                tracing::warn!(status, "github upstream returned an error status");
                Self::upstream(status)
            }
            GitHubAttachError::Gateway(source @ GitHubGatewayError::Transport(_)) => {
                tracing::error!(error = %source, "github request failed");
                Self::internal()
            }
            GitHubAttachError::Repository(source) => {
                tracing::error!(error = %source, "project repository failure");
                Self::internal()
            }
        }
    }
}
