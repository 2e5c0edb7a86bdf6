//! Request handlers, one module per aggregate.

pub mod projects;
pub mod tasks;
