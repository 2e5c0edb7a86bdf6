//! Domain types for the project aggregate.

mod error;
mod github_repo;
mod ids;
mod project;

pub use error::ParseProjectStatusError;
pub use github_repo::GitHubRepoSummary;
pub use ids::ProjectId;
pub use project::{
    NewProject, PersistedProjectData, Project, ProjectPatch, ProjectStatus, ProjectWithTasks,
    PROJECT_NAME_MAX_LEN,
};
