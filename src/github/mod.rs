//! GitHub integration: upstream gateway and the attach operation.
//!
//! The attach operation snapshots a user's five most-recently-updated
//! repositories onto a project record, memoised through the process-local
//! TTL cache so repeated requests for the same username skip the network.

pub mod adapters;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
