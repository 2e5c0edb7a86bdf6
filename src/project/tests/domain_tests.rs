//! Domain-level tests for project types.

use crate::project::domain::{
    PersistedProjectData, Project, ProjectId, ProjectPatch, ProjectStatus,
};
use chrono::{TimeZone, Utc};
use rstest::rstest;

#[rstest]
#[case("active", ProjectStatus::Active)]
#[case("archived", ProjectStatus::Archived)]
#[case(" Active ", ProjectStatus::Active)]
#[case("ARCHIVED", ProjectStatus::Archived)]
fn status_parses_known_labels(#[case] raw: &str, #[case] expected: ProjectStatus) {
    assert_eq!(ProjectStatus::try_from(raw).expect("known label"), expected);
}

#[test]
fn status_rejects_unknown_label() {
    let err = ProjectStatus::try_from("paused").expect_err("unknown label");
    assert_eq!(err.0, "paused");
}

#[test]
fn status_round_trips_through_as_str() {
    for status in [ProjectStatus::Active, ProjectStatus::Archived] {
        assert_eq!(
            ProjectStatus::try_from(status.as_str()).expect("own label"),
            status,
        );
    }
}

#[test]
fn default_status_is_active() {
    assert_eq!(ProjectStatus::default(), ProjectStatus::Active);
}

#[test]
fn empty_patch_reports_empty() {
    assert!(ProjectPatch::default().is_empty());
    let patch = ProjectPatch {
        name: Some("renamed".to_owned()),
        ..ProjectPatch::default()
    };
    assert!(!patch.is_empty());
}

#[test]
fn from_persisted_preserves_all_fields() {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
    let updated = Utc.with_ymd_and_hms(2024, 3, 2, 9, 0, 0).unwrap();
    let project = Project::from_persisted(PersistedProjectData {
        id: ProjectId::new(7),
        name: "Orbital".to_owned(),
        description: Some("Launch window tracker".to_owned()),
        status: ProjectStatus::Archived,
        github_repos: None,
        created_at: created,
        updated_at: updated,
    });

    assert_eq!(project.id(), ProjectId::new(7));
    assert_eq!(project.name(), "Orbital");
    assert_eq!(project.description(), Some("Launch window tracker"));
    assert_eq!(project.status(), ProjectStatus::Archived);
    assert!(project.github_repos().is_none());
    assert_eq!(project.created_at(), created);
    assert_eq!(project.updated_at(), updated);
}
