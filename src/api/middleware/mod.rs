//! Router middleware.

pub mod rate_limit;
