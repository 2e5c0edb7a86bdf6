//! Gateway port for the upstream GitHub API.

use crate::project::domain::GitHubRepoSummary;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for gateway operations.
pub type GitHubGatewayResult<T> = Result<T, GitHubGatewayError>;

/// Upstream contract: list a user's repositories, most recent first.
///
/// Implementations request up to one page of 100 repositories sorted by
/// update time; callers re-sort defensively and truncate to the summary
/// window themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitHubGateway: Send + Sync {
    /// Fetches the user's repositories from the upstream API.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubGatewayError::UpstreamStatus`] when GitHub answers
    /// with a non-success status, or [`GitHubGatewayError::Transport`] when
    /// the request never completes or the body cannot be decoded.
    async fn recent_repositories(
        &self,
        username: &str,
    ) -> GitHubGatewayResult<Vec<GitHubRepoSummary>>;
}

/// Errors returned by gateway implementations.
#[derive(Debug, Clone, Error)]
pub enum GitHubGatewayError {
    /// GitHub answered with a non-success HTTP status.
    #[error("github responded with status {status}")]
    UpstreamStatus {
        /// The upstream HTTP status code.
        status: u16,
    },

    /// The request failed before a response was decoded.
    #[error("github request failed: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl GitHubGatewayError {
    /// Wraps a transport-level error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
