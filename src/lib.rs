//! Projects API: a REST service for managing projects and their tasks.
//!
//! The service exposes CRUD operations over projects and tasks backed by
//! `PostgreSQL`, plus an attach operation that snapshots a GitHub user's five
//! most-recently-updated repositories onto a project record, memoised through
//! a process-local TTL cache.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure entity types with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence and upstream calls
//! - **Adapters**: Concrete implementations of ports (database, GitHub API)
//! - **Services**: Orchestration and existence checks
//! - **API**: HTTP boundary translating requests into service calls
//!
//! # Modules
//!
//! - [`project`]: Project aggregate, repository port, and lifecycle service
//! - [`task`]: Task aggregate bound to a parent project
//! - [`github`]: Upstream gateway and the attach orchestration service
//! - [`cache`]: Process-local TTL cache component
//! - [`api`]: axum routes, DTOs, validation, and middleware
//! - [`config`]: Environment-driven configuration
//! - [`db`]: Diesel schema and connection pool helpers

pub mod api;
pub mod cache;
pub mod config;
pub mod db;
pub mod github;
pub mod project;
pub mod task;
