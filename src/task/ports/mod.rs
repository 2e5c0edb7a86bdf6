//! Port contracts for the task aggregate.

mod repository;

pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
