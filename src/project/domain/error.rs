//! Error types for project domain parsing.

use thiserror::Error;

/// Error returned while parsing project statuses from persistence or input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);
