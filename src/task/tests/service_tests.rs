//! Service orchestration tests for task CRUD over the in-memory store.

use std::sync::Arc;

use crate::project::adapters::memory::{InMemoryProjectRepository, InMemoryStore};
use crate::project::domain::{NewProject, Project, ProjectId, ProjectStatus};
use crate::project::ports::ProjectRepository;
use crate::task::adapters::memory::InMemoryTaskRepository;
use crate::task::domain::{TaskId, TaskPatch, TaskStatus};
use crate::task::services::{NewTaskData, TaskService, TaskServiceError};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

type TestService =
    TaskService<InMemoryTaskRepository, InMemoryProjectRepository, DefaultClock>;

struct Harness {
    service: TestService,
    projects: Arc<InMemoryProjectRepository>,
}

#[fixture]
fn harness() -> Harness {
    let store = InMemoryStore::shared();
    let projects = Arc::new(InMemoryProjectRepository::new(Arc::clone(&store)));
    let tasks = Arc::new(InMemoryTaskRepository::new(store));
    Harness {
        service: TaskService::new(tasks, Arc::clone(&projects), Arc::new(DefaultClock)),
        projects,
    }
}

async fn seed_project(harness: &Harness) -> Project {
    harness
        .projects
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

fn new_task(title: &str) -> NewTaskData {
    NewTaskData {
        title: title.to_owned(),
        description: Some("details".to_owned()),
        status: TaskStatus::Pending,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_persists_task_under_project(harness: Harness) {
    let project = seed_project(&harness).await;

    let task = harness
        .service
        .create(project.id(), new_task("Wire telemetry"))
        .await
        .expect("task creation should succeed");

    assert_eq!(task.id(), TaskId::new(1));
    assert_eq!(task.project_id(), project.id());
    assert_eq!(task.title(), "Wire telemetry");
    assert_eq!(task.created_at(), task.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_missing_project_without_inserting(harness: Harness) {
    let result = harness
        .service
        .create(ProjectId::new(404), new_task("Orphan"))
        .await;
    assert!(matches!(result, Err(TaskServiceError::ProjectNotFound)));

    // The failed attempt must not have consumed an identifier.
    let project = seed_project(&harness).await;
    let task = harness
        .service
        .create(project.id(), new_task("First real task"))
        .await
        .expect("task creation should succeed");
    assert_eq!(task.id(), TaskId::new(1));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_applies_only_present_fields(harness: Harness) {
    let project = seed_project(&harness).await;
    let created = harness
        .service
        .create(project.id(), new_task("Wire telemetry"))
        .await
        .expect("task creation should succeed");

    let patch = TaskPatch {
        title: None,
        description: None,
        status: Some(TaskStatus::Done),
    };
    let updated = harness
        .service
        .update(created.id(), patch)
        .await
        .expect("update should succeed");

    assert_eq!(updated.title(), created.title());
    assert_eq!(updated.description(), created.description());
    assert_eq!(updated.status(), TaskStatus::Done);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_missing_task_reports_not_found(harness: Harness) {
    let result = harness
        .service
        .update(TaskId::new(404), TaskPatch::default())
        .await;
    assert!(matches!(result, Err(TaskServiceError::NotFound)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remove_deletes_task(harness: Harness) {
    let project = seed_project(&harness).await;
    let task = harness
        .service
        .create(project.id(), new_task("Short lived"))
        .await
        .expect("task creation should succeed");

    harness
        .service
        .remove(task.id())
        .await
        .expect("removal should succeed");

    let second_removal = harness.service.remove(task.id()).await;
    assert!(matches!(second_removal, Err(TaskServiceError::NotFound)));
}
