//! Adapter implementations of the GitHub gateway port.

mod http;

pub use http::HttpGitHubGateway;
