//! Attach flow tests with a mocked upstream gateway.

use std::sync::Arc;

use crate::cache::TtlCache;
use crate::github::ports::{GitHubGatewayError, MockGitHubGateway};
use crate::github::services::{GitHubAttachError, GitHubAttachService, RECENT_REPO_LIMIT};
use crate::project::adapters::memory::{InMemoryProjectRepository, InMemoryStore};
use crate::project::domain::{GitHubRepoSummary, NewProject, Project, ProjectId, ProjectStatus};
use crate::project::ports::ProjectRepository;
use chrono::{Duration, TimeZone, Utc};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

type TestService =
    GitHubAttachService<InMemoryProjectRepository, MockGitHubGateway, DefaultClock>;

struct Harness {
    projects: Arc<InMemoryProjectRepository>,
    clock: Arc<DefaultClock>,
}

#[fixture]
fn harness() -> Harness {
    let store = InMemoryStore::shared();
    Harness {
        projects: Arc::new(InMemoryProjectRepository::new(store)),
        clock: Arc::new(DefaultClock),
    }
}

impl Harness {
    fn service(&self, gateway: MockGitHubGateway, cache_enabled: bool) -> TestService {
        let cache = Arc::new(TtlCache::new(
            Duration::minutes(10),
            cache_enabled,
            Arc::clone(&self.clock),
        ));
        GitHubAttachService::new(
            Arc::clone(&self.projects),
            Arc::new(gateway),
            cache,
            Arc::clone(&self.clock),
        )
    }

    async fn seed_project(&self) -> Project {
        self.projects
            .create(
                NewProject {
                    name: "Host".to_owned(),
                    description: None,
                    status: ProjectStatus::Active,
                },
                DefaultClock.utc(),
            )
            .await
            .expect("project creation should succeed")
    }
}

fn repo(id: i64, name: &str, updated_minutes_ago: i64) -> GitHubRepoSummary {
    let base = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    GitHubRepoSummary {
        id,
        name: name.to_owned(),
        html_url: format!("https://github.com/octocat/{name}"),
        description: None,
        stargazers_count: 0,
        forks_count: 0,
        language: Some("Rust".to_owned()),
        created_at: base - Duration::days(30),
        updated_at: base - Duration::minutes(updated_minutes_ago),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn attach_persists_five_most_recent_repos_in_order(harness: Harness) {
    let project = harness.seed_project().await;

    let mut gateway = MockGitHubGateway::new();
    // Seven repos, deliberately out of order.
    gateway
        .expect_recent_repositories()
        .times(1)
        .returning(|_| {
            Ok(vec![
                repo(1, "stale", 300),
                repo(2, "fresh", 1),
                repo(3, "older", 200),
                repo(4, "newer", 2),
                repo(5, "mid", 50),
                repo(6, "ancient", 400),
                repo(7, "recent", 5),
            ])
        });
    let service = harness.service(gateway, true);

    let attached = service
        .attach(project.id(), "octocat")
        .await
        .expect("attach should succeed");

    assert_eq!(attached.repos.len(), RECENT_REPO_LIMIT);
    let names: Vec<&str> = attached
        .repos
        .iter()
        .map(|repo| repo.name.as_str())
        .collect();
    assert_eq!(names, vec!["fresh", "newer", "recent", "mid", "older"]);

    let persisted = harness
        .projects
        .find_by_id(project.id())
        .await
        .expect("lookup should succeed")
        .expect("project should still exist");
    assert_eq!(persisted.github_repos(), Some(attached.repos.as_slice()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_attach_for_same_username_is_served_from_cache(harness: Harness) {
    let project = harness.seed_project().await;

    let mut gateway = MockGitHubGateway::new();
    gateway
        .expect_recent_repositories()
        .times(1)
        .returning(|_| Ok(vec![repo(1, "solo", 1)]));
    let service = harness.service(gateway, true);

    let first = service
        .attach(project.id(), "octocat")
        .await
        .expect("first attach should succeed");
    let second = service
        .attach(project.id(), "octocat")
        .await
        .expect("second attach should succeed");

    assert_eq!(first.repos, second.repos);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn disabled_cache_fetches_upstream_every_time(harness: Harness) {
    let project = harness.seed_project().await;

    let mut gateway = MockGitHubGateway::new();
    gateway
        .expect_recent_repositories()
        .times(2)
        .returning(|_| Ok(vec![repo(1, "solo", 1)]));
    let service = harness.service(gateway, false);

    service
        .attach(project.id(), "octocat")
        .await
        .expect("first attach should succeed");
    service
        .attach(project.id(), "octocat")
        .await
        .expect("second attach should succeed");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_project_never_calls_upstream(harness: Harness) {
    let mut gateway = MockGitHubGateway::new();
    gateway.expect_recent_repositories().times(0);
    let service = harness.service(gateway, true);

    let result = service.attach(ProjectId::new(404), "octocat").await;
    assert!(matches!(result, Err(GitHubAttachError::ProjectNotFound)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn upstream_error_propagates_and_persists_nothing(harness: Harness) {
    let project = harness.seed_project().await;

    let mut gateway = MockGitHubGateway::new();
    gateway
        .expect_recent_repositories()
        .times(1)
        .returning(|_| Err(GitHubGatewayError::UpstreamStatus { status: 403 }));
    let service = harness.service(gateway, true);

    let result = service.attach(project.id(), "octocat").await;
    assert!(matches!(
        result,
        Err(GitHubAttachError::Gateway(
            GitHubGatewayError::UpstreamStatus { status: 403 }
        ))
    ));

    let persisted = harness
        .projects
        .find_by_id(project.id())
        .await
        .expect("lookup should succeed")
        .expect("project should still exist");
    assert!(persisted.github_repos().is_none());
}
