//! Request and response transfer objects.

pub mod requests;
pub mod responses;
