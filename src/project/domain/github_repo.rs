//! Repository summary shape attached to projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Snapshot of a single GitHub repository, in the upstream wire shape.
///
/// The field names deliberately mirror the GitHub REST API so the summary can
/// be deserialised straight from the upstream response and persisted verbatim
/// into the project's JSONB column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GitHubRepoSummary {
    /// Upstream repository identifier.
    pub id: i64,
    /// Repository name.
    pub name: String,
    /// Browser URL.
    pub html_url: String,
    /// Optional repository description.
    pub description: Option<String>,
    /// Star count.
    pub stargazers_count: i64,
    /// Fork count.
    pub forks_count: i64,
    /// Dominant language, when detected.
    pub language: Option<String>,
    /// Upstream creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Upstream last-update timestamp.
    pub updated_at: DateTime<Utc>,
}
