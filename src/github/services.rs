//! Attach orchestration: fetch-or-serve-cached repositories for a project.

use crate::cache::TtlCache;
use crate::github::ports::{GitHubGateway, GitHubGatewayError};
use crate::project::domain::{GitHubRepoSummary, ProjectId};
use crate::project::ports::{ProjectRepository, ProjectRepositoryError};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Number of repositories retained per attach snapshot.
pub const RECENT_REPO_LIMIT: usize = 5;

/// Service-level errors for the attach operation.
#[derive(Debug, Error)]
pub enum GitHubAttachError {
    /// The target project does not exist.
    #[error("project not found")]
    ProjectNotFound,

    /// The upstream call failed; propagated unmodified, no retry.
    #[error(transparent)]
    Gateway(#[from] GitHubGatewayError),

    /// Persisting the snapshot failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
}

/// Result type for attach operations.
pub type GitHubAttachResult<T> = Result<T, GitHubAttachError>;

/// Outcome of a successful attach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedRepos {
    /// The project the snapshot was attached to.
    pub project_id: ProjectId,
    /// The GitHub username the snapshot was taken from.
    pub username: String,
    /// The repositories persisted onto the project.
    pub repos: Vec<GitHubRepoSummary>,
}

/// Orchestrates the two-state attach flow: serve-cached or fetch.
///
/// Concurrent misses for the same username may each hit the upstream; the
/// last cache write wins and both compute the same answer, so no
/// single-flight deduplication is applied.
pub struct GitHubAttachService<P, G, C>
where
    P: ProjectRepository,
    G: GitHubGateway,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    gateway: Arc<G>,
    cache: Arc<TtlCache<Vec<GitHubRepoSummary>, C>>,
    clock: Arc<C>,
}

impl<P, G, C> Clone for GitHubAttachService<P, G, C>
where
    P: ProjectRepository,
    G: GitHubGateway,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            projects: Arc::clone(&self.projects),
            gateway: Arc::clone(&self.gateway),
            cache: Arc::clone(&self.cache),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<P, G, C> GitHubAttachService<P, G, C>
where
    P: ProjectRepository,
    G: GitHubGateway,
    C: Clock + Send + Sync,
{
    /// Creates a new attach service.
    #[must_use]
    pub const fn new(
        projects: Arc<P>,
        gateway: Arc<G>,
        cache: Arc<TtlCache<Vec<GitHubRepoSummary>, C>>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            projects,
            gateway,
            cache,
            clock,
        }
    }

    /// Fetches the user's five most-recently-updated repositories and
    /// persists them onto the project, overwriting any previous snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`GitHubAttachError::ProjectNotFound`] when the project does
    /// not exist (the upstream is never called in that case), or propagates
    /// the upstream/persistence failure unmodified.
    pub async fn attach(
        &self,
        project_id: ProjectId,
        username: &str,
    ) -> GitHubAttachResult<AttachedRepos> {
        let project = self.projects.find_by_id(project_id).await?;
        if project.is_none() {
            return Err(GitHubAttachError::ProjectNotFound);
        }

        let key = cache_key(username);
        let repos = match self.cache.get(&key) {
            Some(cached) => {
                tracing::debug!(%username, "serving github repositories from cache");
                cached
            }
            None => {
                tracing::debug!(%username, "fetching github repositories upstream");
                let mut fetched = self.gateway.recent_repositories(username).await?;
                // The request asks for update-sorted results, but order is
                // re-established here so correctness does not depend on it.
                fetched.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
                fetched.truncate(RECENT_REPO_LIMIT);
                self.cache.set(key, fetched.clone());
                fetched
            }
        };

        let persisted = self
            .projects
            .set_github_repos(project_id, &repos, self.clock.utc())
            .await?;
        if persisted.is_none() {
            // Deleted between the existence check and the write.
            return Err(GitHubAttachError::ProjectNotFound);
        }

        Ok(AttachedRepos {
            project_id,
            username: username.to_owned(),
            repos,
        })
    }
}

/// Cache key for a username's snapshot window.
fn cache_key(username: &str) -> String {
    format!("gh:{username}:last5")
}
