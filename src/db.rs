//! Diesel schema and `PostgreSQL` connection pool helpers.
//!
//! The relational schema itself (migrations, seeders) is managed outside the
//! crate; this module declares the table shapes the adapters query against.

use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool, PoolError};

diesel::table! {
    /// Project records with an optional attached GitHub repository snapshot.
    projects (id) {
        /// Generated project identifier.
        id -> Int4,
        /// Project name.
        #[max_length = 120]
        name -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Project lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Snapshot of the most recent GitHub repositories, if attached.
        github_repos -> Nullable<Jsonb>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records owned by a project (`ON DELETE CASCADE`).
    tasks (id) {
        /// Generated task identifier.
        id -> Int4,
        /// Owning project identifier.
        project_id -> Int4,
        /// Task title.
        #[max_length = 120]
        title -> Varchar,
        /// Optional free-text description.
        description -> Nullable<Text>,
        /// Task lifecycle status.
        #[max_length = 20]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(tasks -> projects (project_id));
diesel::allow_tables_to_appear_in_same_query!(projects, tasks);

/// `PostgreSQL` connection pool type shared by the adapters.
pub type PgPool = Pool<ConnectionManager<PgConnection>>;

/// Builds an r2d2 connection pool for the given database URL.
///
/// # Errors
///
/// Returns [`PoolError`] when the pool cannot be initialised.
pub fn build_pool(database_url: &str) -> Result<PgPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder().build(manager)
}
