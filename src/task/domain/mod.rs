//! Domain types for the task aggregate.

mod error;
mod ids;
mod task;

pub use error::ParseTaskStatusError;
pub use ids::TaskId;
pub use task::{
    NewTask, PersistedTaskData, Task, TaskPatch, TaskStatus, TASK_TITLE_MAX_LEN,
};
