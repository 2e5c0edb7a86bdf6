//! HTTP boundary: DTOs, validation, handlers, routes, and middleware.
//!
//! Handlers translate request parameters into exactly one service call each
//! and map the outcome onto a status code; every failure funnels through the
//! single [`error::ApiError`] response type.

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod validation;
