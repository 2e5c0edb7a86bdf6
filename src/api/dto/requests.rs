//! Request bodies and their validation into domain payloads.
//!
//! Every field deserialises as optional so that a missing field surfaces as a
//! field-level validation error rather than a deserialisation failure; all
//! problems with a body are collected and reported together.

use crate::api::error::FieldError;
use crate::api::validation::{max_length, project_status, required, task_status};
use crate::project::domain::{NewProject, ProjectPatch, PROJECT_NAME_MAX_LEN};
use crate::task::domain::{TaskPatch, TASK_TITLE_MAX_LEN};
use crate::task::services::NewTaskData;
use serde::Deserialize;

/// Body of `POST /projects`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateProjectRequest {
    /// Project name; required, at most 120 characters.
    pub name: Option<String>,
    /// Project description; required.
    pub description: Option<String>,
    /// Initial status label; required.
    pub status: Option<String>,
}

impl CreateProjectRequest {
    /// Validates the body into a creation payload.
    ///
    /// # Errors
    ///
    /// Returns every field error found, not just the first.
    pub fn validate(self) -> Result<NewProject, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = required("name", self.name)
            .and_then(|name| max_length("name", &name, PROJECT_NAME_MAX_LEN).map(|()| name))
            .map_err(|err| errors.push(err))
            .ok();
        let description = required("description", self.description)
            .map_err(|err| errors.push(err))
            .ok();
        let status = required("status", self.status)
            .and_then(|raw| project_status("status", &raw))
            .map_err(|err| errors.push(err))
            .ok();

        match (name, description, status) {
            (Some(name), Some(description), Some(status)) => Ok(NewProject {
                name,
                description: Some(description),
                status,
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `PUT /projects/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectRequest {
    /// Replacement name; at most 120 characters when present.
    pub name: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement status label.
    pub status: Option<String>,
}

impl UpdateProjectRequest {
    /// Validates the body into a patch.
    ///
    /// # Errors
    ///
    /// Returns every field error found, not just the first.
    pub fn validate(self) -> Result<ProjectPatch, Vec<FieldError>> {
        let mut errors = Vec::new();

        if let Some(name) = &self.name {
            if let Err(err) = max_length("name", name, PROJECT_NAME_MAX_LEN) {
                errors.push(err);
            }
        }
        let status = match self.status.as_deref() {
            Some(raw) => project_status("status", raw)
                .map_err(|err| errors.push(err))
                .ok(),
            None => None,
        };

        if errors.is_empty() {
            Ok(ProjectPatch {
                name: self.name,
                description: self.description,
                status,
            })
        } else {
            Err(errors)
        }
    }
}

/// Body of `POST /projects/{id}/tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskRequest {
    /// Task title; required, at most 120 characters.
    pub title: Option<String>,
    /// Task description; required.
    pub description: Option<String>,
    /// Initial status label; required.
    pub status: Option<String>,
}

impl CreateTaskRequest {
    /// Validates the body into a creation payload.
    ///
    /// # Errors
    ///
    /// Returns every field error found, not just the first.
    pub fn validate(self) -> Result<NewTaskData, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = required("title", self.title)
            .and_then(|title| max_length("title", &title, TASK_TITLE_MAX_LEN).map(|()| title))
            .map_err(|err| errors.push(err))
            .ok();
        let description = required("description", self.description)
            .map_err(|err| errors.push(err))
            .ok();
        let status = required("status", self.status)
            .and_then(|raw| task_status("status", &raw))
            .map_err(|err| errors.push(err))
            .ok();

        match (title, description, status) {
            (Some(title), Some(description), Some(status)) => Ok(NewTaskData {
                title,
                description: Some(description),
                status,
            }),
            _ => Err(errors),
        }
    }
}

/// Body of `PUT /tasks/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    /// Replacement title; at most 120 characters when present.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement status label.
    pub status: Option<String>,
}

impl UpdateTaskRequest {
    /// Validates the body into a patch.
    ///
    /// # Errors
    ///
    /// Returns every field error found, not just the first.
    pub fn validate(self) -> Result<TaskPatch, Vec<FieldError>> {
        let mut errors = Vec::new();

        if let Some(title) = &self.title {
            if let Err(err) = max_length("title", title, TASK_TITLE_MAX_LEN) {
                errors.push(err);
            }
        }
        let status = match self.status.as_deref() {
            Some(raw) => task_status("status", raw)
                .map_err(|err| errors.push(err))
                .ok(),
            None => None,
        };

        if errors.is_empty() {
            Ok(TaskPatch {
                title: self.title,
                description: self.description,
                status,
            })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::domain::ProjectStatus;
    use crate::task::domain::TaskStatus;

    #[test]
    fn create_project_accepts_complete_body() {
        let request = CreateProjectRequest {
            name: Some("Orbital".to_owned()),
            description: Some("Launch window tracker".to_owned()),
            status: Some("active".to_owned()),
        };
        let data = request.validate().expect("valid body");
        assert_eq!(data.name, "Orbital");
        assert_eq!(data.status, ProjectStatus::Active);
    }

    #[test]
    fn create_project_reports_all_missing_fields() {
        let errors = CreateProjectRequest::default()
            .validate()
            .expect_err("empty body");
        let fields: Vec<&str> = errors.iter().map(|err| err.field.as_str()).collect();
        assert_eq!(fields, vec!["name", "description", "status"]);
    }

    #[test]
    fn create_project_rejects_overlong_name() {
        let request = CreateProjectRequest {
            name: Some("x".repeat(121)),
            description: Some("desc".to_owned()),
            status: Some("active".to_owned()),
        };
        let errors = request.validate().expect_err("overlong name");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "name");
    }

    #[test]
    fn update_project_allows_empty_patch() {
        let patch = UpdateProjectRequest::default()
            .validate()
            .expect("empty patch is valid");
        assert!(patch.is_empty());
    }

    #[test]
    fn update_project_rejects_unknown_status() {
        let request = UpdateProjectRequest {
            status: Some("paused".to_owned()),
            ..UpdateProjectRequest::default()
        };
        let errors = request.validate().expect_err("unknown status");
        assert_eq!(errors[0].field, "status");
    }

    #[test]
    fn create_task_parses_status_label() {
        let request = CreateTaskRequest {
            title: Some("Wire telemetry".to_owned()),
            description: Some("Hook up the downlink".to_owned()),
            status: Some("in_progress".to_owned()),
        };
        let data = request.validate().expect("valid body");
        assert_eq!(data.status, TaskStatus::InProgress);
    }

    #[test]
    fn update_task_collects_title_and_status_errors() {
        let request = UpdateTaskRequest {
            title: Some("x".repeat(121)),
            description: None,
            status: Some("blocked".to_owned()),
        };
        let errors = request.validate().expect_err("two bad fields");
        assert_eq!(errors.len(), 2);
    }
}
