//! `PostgreSQL` adapter for task persistence.

mod models;
mod repository;

pub use models::{NewTaskRow, TaskRow};
pub use repository::PostgresTaskRepository;

pub(crate) use repository::row_to_task;
