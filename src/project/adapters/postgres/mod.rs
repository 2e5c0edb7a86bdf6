//! `PostgreSQL` adapter for project persistence.

mod models;
mod repository;

pub use models::{NewProjectRow, ProjectRow};
pub use repository::PostgresProjectRepository;
