//! Service orchestration tests for project CRUD over the in-memory store.

use std::sync::Arc;

use crate::project::adapters::memory::{InMemoryProjectRepository, InMemoryStore, SharedStore};
use crate::project::domain::{NewProject, ProjectId, ProjectPatch, ProjectStatus};
use crate::project::services::{ProjectService, ProjectServiceError};
use crate::task::adapters::memory::InMemoryTaskRepository;
use crate::task::domain::TaskStatus;
use crate::task::services::{NewTaskData, TaskService};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestProjectService = ProjectService<InMemoryProjectRepository, DefaultClock>;
type TestTaskService =
    TaskService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

struct Harness {
    projects: TestProjectService,
    tasks: TestTaskService,
}

#[fixture]
fn harness() -> Harness {
    let store: SharedStore = InMemoryStore::shared();
    let clock = Arc::new(DefaultClock);
    let project_repo = Arc::new(InMemoryProjectRepository::new(Arc::clone(&store)));
    let task_repo = Arc::new(InMemoryTaskRepository::new(store));
    Harness {
        projects: ProjectService::new(Arc::clone(&project_repo), Arc::clone(&clock)),
        tasks: TaskService::new(task_repo, project_repo, clock),
    }
}

fn new_project(name: &str) -> NewProject {
    NewProject {
        name: name.to_owned(),
        description: Some(format!("{name} description")),
        status: ProjectStatus::Active,
    }
}

fn new_task(title: &str) -> NewTaskData {
    NewTaskData {
        title: title.to_owned(),
        description: None,
        status: TaskStatus::Pending,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_sequential_identifiers(harness: Harness) {
    let first = harness
        .projects
        .create(new_project("First"))
        .await
        .expect("creation should succeed");
    let second = harness
        .projects
        .create(new_project("Second"))
        .await
        .expect("creation should succeed");

    assert_eq!(first.id(), ProjectId::new(1));
    assert_eq!(second.id(), ProjectId::new(2));
    assert_eq!(first.created_at(), first.updated_at());
    assert!(first.github_repos().is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_then_get_round_trips(harness: Harness) {
    let created = harness
        .projects
        .create(new_project("Orbital"))
        .await
        .expect("creation should succeed");

    let fetched = harness
        .projects
        .get(created.id())
        .await
        .expect("lookup should succeed");

    assert_eq!(fetched.project, created);
    assert!(fetched.tasks.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn get_missing_project_reports_not_found(harness: Harness) {
    let result = harness.projects.get(ProjectId::new(404)).await;
    assert!(matches!(result, Err(ProjectServiceError::NotFound)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_applies_only_present_fields(harness: Harness) {
    let created = harness
        .projects
        .create(new_project("Orbital"))
        .await
        .expect("creation should succeed");

    let patch = ProjectPatch {
        name: Some("Orbital II".to_owned()),
        description: None,
        status: Some(ProjectStatus::Archived),
    };
    let updated = harness
        .projects
        .update(created.id(), patch)
        .await
        .expect("update should succeed");

    assert_eq!(updated.name(), "Orbital II");
    assert_eq!(updated.description(), created.description());
    assert_eq!(updated.status(), ProjectStatus::Archived);
    assert_eq!(updated.created_at(), created.created_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_missing_project_reports_not_found(harness: Harness) {
    let result = harness
        .projects
        .update(ProjectId::new(404), ProjectPatch::default())
        .await;
    assert!(matches!(result, Err(ProjectServiceError::NotFound)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_deletes_project_and_cascades_to_tasks(harness: Harness) {
    let project = harness
        .projects
        .create(new_project("Doomed"))
        .await
        .expect("creation should succeed");
    let task = harness
        .tasks
        .create(project.id(), new_task("Orphan candidate"))
        .await
        .expect("task creation should succeed");

    harness
        .projects
        .remove(project.id())
        .await
        .expect("removal should succeed");

    let project_lookup = harness.projects.get(project.id()).await;
    assert!(matches!(project_lookup, Err(ProjectServiceError::NotFound)));

    let task_update = harness
        .tasks
        .update(task.id(), crate::task::domain::TaskPatch::default())
        .await;
    assert!(matches!(
        task_update,
        Err(crate::task::services::TaskServiceError::NotFound)
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_missing_project_reports_not_found(harness: Harness) {
    let result = harness.projects.remove(ProjectId::new(404)).await;
    assert!(matches!(result, Err(ProjectServiceError::NotFound)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_nests_tasks_under_their_projects(harness: Harness) {
    let first = harness
        .projects
        .create(new_project("First"))
        .await
        .expect("creation should succeed");
    let second = harness
        .projects
        .create(new_project("Second"))
        .await
        .expect("creation should succeed");
    harness
        .tasks
        .create(first.id(), new_task("Only task"))
        .await
        .expect("task creation should succeed");

    let listed = harness
        .projects
        .list()
        .await
        .expect("listing should succeed");

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].project.id(), first.id());
    assert_eq!(listed[0].tasks.len(), 1);
    assert_eq!(listed[0].tasks[0].title(), "Only task");
    assert_eq!(listed[1].project.id(), second.id());
    assert!(listed[1].tasks.is_empty());
}
