//! Shared handler state: one service per aggregate plus the attach flow.

use crate::cache::TtlCache;
use crate::github::ports::GitHubGateway;
use crate::github::services::GitHubAttachService;
use crate::project::domain::GitHubRepoSummary;
use crate::project::ports::ProjectRepository;
use crate::project::services::ProjectService;
use crate::task::ports::TaskRepository;
use crate::task::services::TaskService;
use mockable::Clock;
use std::sync::Arc;

/// Application state handed to every handler.
///
/// Generic over the repository, gateway, and clock implementations so that
/// tests can assemble the same router over in-memory adapters and stub
/// gateways.
pub struct AppState<PR, TR, G, C>
where
    PR: ProjectRepository,
    TR: TaskRepository,
    G: GitHubGateway,
    C: Clock + Send + Sync,
{
    /// Project CRUD service.
    pub projects: ProjectService<PR, C>,
    /// Task CRUD service.
    pub tasks: TaskService<TR, PR, C>,
    /// GitHub attach service.
    pub github: GitHubAttachService<PR, G, C>,
}

impl<PR, TR, G, C> Clone for AppState<PR, TR, G, C>
where
    PR: ProjectRepository,
    TR: TaskRepository,
    G: GitHubGateway,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            projects: self.projects.clone(),
            tasks: self.tasks.clone(),
            github: self.github.clone(),
        }
    }
}

impl<PR, TR, G, C> AppState<PR, TR, G, C>
where
    PR: ProjectRepository,
    TR: TaskRepository,
    G: GitHubGateway,
    C: Clock + Send + Sync,
{
    /// Wires the services over the given adapters.
    #[must_use]
    pub fn new(
        projects: Arc<PR>,
        tasks: Arc<TR>,
        gateway: Arc<G>,
        cache: Arc<TtlCache<Vec<GitHubRepoSummary>, C>>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            projects: ProjectService::new(Arc::clone(&projects), Arc::clone(&clock)),
            tasks: TaskService::new(tasks, Arc::clone(&projects), Arc::clone(&clock)),
            github: GitHubAttachService::new(projects, gateway, cache, clock),
        }
    }
}
