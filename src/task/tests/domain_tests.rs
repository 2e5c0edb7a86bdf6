//! Domain-level tests for task types.

use crate::project::domain::ProjectId;
use crate::task::domain::{PersistedTaskData, Task, TaskId, TaskPatch, TaskStatus};
use chrono::{TimeZone, Utc};
use rstest::rstest;

#[rstest]
#[case("pending", TaskStatus::Pending)]
#[case("in_progress", TaskStatus::InProgress)]
#[case("done", TaskStatus::Done)]
#[case(" DONE ", TaskStatus::Done)]
fn status_parses_known_labels(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw).expect("known label"), expected);
}

#[test]
fn status_rejects_unknown_label() {
    let err = TaskStatus::try_from("blocked").expect_err("unknown label");
    assert_eq!(err.0, "blocked");
}

#[test]
fn default_status_is_pending() {
    assert_eq!(TaskStatus::default(), TaskStatus::Pending);
}

#[test]
fn empty_patch_reports_empty() {
    assert!(TaskPatch::default().is_empty());
}

#[test]
fn from_persisted_preserves_all_fields() {
    let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let task = Task::from_persisted(PersistedTaskData {
        id: TaskId::new(3),
        project_id: ProjectId::new(7),
        title: "Wire telemetry".to_owned(),
        description: None,
        status: TaskStatus::InProgress,
        created_at: stamp,
        updated_at: stamp,
    });

    assert_eq!(task.id(), TaskId::new(3));
    assert_eq!(task.project_id(), ProjectId::new(7));
    assert_eq!(task.title(), "Wire telemetry");
    assert!(task.description().is_none());
    assert_eq!(task.status(), TaskStatus::InProgress);
}
