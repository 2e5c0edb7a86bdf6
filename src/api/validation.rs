//! Field-level validation rules shared by the request DTOs.

use crate::api::error::FieldError;
use crate::project::domain::ProjectStatus;
use crate::task::domain::TaskStatus;

/// Requires a present, non-blank string value.
pub(crate) fn required(field: &str, value: Option<String>) -> Result<String, FieldError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(FieldError::new(field, format!("{field} is required"))),
    }
}

/// Rejects values longer than `limit` characters.
pub(crate) fn max_length(field: &str, value: &str, limit: usize) -> Result<(), FieldError> {
    if value.chars().count() > limit {
        return Err(FieldError::new(
            field,
            format!("{field} must be at most {limit} characters"),
        ));
    }
    Ok(())
}

/// Parses a project status label.
pub(crate) fn project_status(field: &str, raw: &str) -> Result<ProjectStatus, FieldError> {
    ProjectStatus::try_from(raw).map_err(|_| {
        FieldError::new(field, format!("{field} must be one of: active, archived"))
    })
}

/// Parses a task status label.
pub(crate) fn task_status(field: &str, raw: &str) -> Result<TaskStatus, FieldError> {
    TaskStatus::try_from(raw).map_err(|_| {
        FieldError::new(
            field,
            format!("{field} must be one of: pending, in_progress, done"),
        )
    })
}

/// Validates a GitHub login path segment.
///
/// GitHub logins are 1 to 39 characters of ASCII letters, digits, or
/// hyphens. Anything else (notably percent-decoded `/`, `?`, or `.`) is
/// rejected here so it can never re-shape the upstream request path.
pub(crate) fn github_username(field: &str, raw: &str) -> Result<(), FieldError> {
    let valid = !raw.is_empty()
        && raw.len() <= 39
        && raw
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '-');
    if valid {
        return Ok(());
    }
    Err(FieldError::new(
        field,
        format!("{field} must be a valid GitHub username"),
    ))
}

/// Parses a positive integer path identifier.
///
/// Rejection is fail-fast: a non-numeric or non-positive id is answered
/// before any repository access.
pub(crate) fn positive_id(field: &str, raw: &str) -> Result<i32, FieldError> {
    raw.parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| FieldError::new(field, format!("{field} must be a positive integer")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("widget".to_owned()), true)]
    #[case(Some("   ".to_owned()), false)]
    #[case(Some(String::new()), false)]
    #[case(None, false)]
    fn required_accepts_only_non_blank(#[case] value: Option<String>, #[case] ok: bool) {
        assert_eq!(required("name", value).is_ok(), ok);
    }

    #[test]
    fn max_length_counts_characters_not_bytes() {
        let value = "é".repeat(120);
        assert!(max_length("name", &value, 120).is_ok());
        assert!(max_length("name", &format!("{value}é"), 120).is_err());
    }

    #[rstest]
    #[case("1", Some(1))]
    #[case("42", Some(42))]
    #[case("0", None)]
    #[case("-3", None)]
    #[case("abc", None)]
    #[case("1.5", None)]
    fn positive_id_rejects_non_positive_and_non_numeric(
        #[case] raw: &str,
        #[case] expected: Option<i32>,
    ) {
        assert_eq!(positive_id("id", raw).ok(), expected);
    }

    #[rstest]
    #[case("octocat", true)]
    #[case("octo-cat", true)]
    #[case("a1", true)]
    #[case("", false)]
    #[case("../other", false)]
    #[case("octo cat", false)]
    #[case("octo?cat", false)]
    #[case("this-login-is-way-over-the-thirty-nine-character-limit", false)]
    fn github_username_accepts_only_login_characters(#[case] raw: &str, #[case] ok: bool) {
        assert_eq!(github_username("username", raw).is_ok(), ok);
    }

    #[test]
    fn status_parsers_reject_unknown_labels() {
        assert!(project_status("status", "active").is_ok());
        assert!(project_status("status", "paused").is_err());
        assert!(task_status("status", "in_progress").is_ok());
        assert!(task_status("status", "blocked").is_err());
    }
}
