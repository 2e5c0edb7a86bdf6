//! Project aggregate and its lifecycle operations.
//!
//! A project owns zero or more tasks and may carry an attached snapshot of a
//! GitHub user's most recent repositories. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
