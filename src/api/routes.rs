//! Router assembly and the HTTP middleware stack.

use crate::api::dto::responses::HealthResponse;
use crate::api::handlers::{projects, tasks};
use crate::api::middleware::rate_limit::{rate_limit, RateLimiter};
use crate::api::state::AppState;
use crate::config::HttpSettings;
use crate::github::ports::GitHubGateway;
use crate::project::ports::ProjectRepository;
use crate::task::ports::TaskRepository;
use axum::http::header::{self, HeaderValue};
use axum::http::Method;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use mockable::Clock;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// `GET /health`
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Builds the CORS layer from the configured origin list.
///
/// A single `*` entry allows any origin without credentials; an explicit list
/// echoes matching origins and allows credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);
    if origins.iter().any(|origin| origin == "*") {
        layer.allow_origin(Any)
    } else {
        let parsed: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        layer
            .allow_origin(AllowOrigin::list(parsed))
            .allow_credentials(true)
    }
}

/// Assembles the application router over the given state.
///
/// Middleware, outermost first: tracing, security headers, compression, CORS,
/// then rate limiting, so that preflights and probes are handled before any
/// counter is touched.
pub fn router<PR, TR, G, C>(state: AppState<PR, TR, G, C>, settings: &HttpSettings) -> Router
where
    PR: ProjectRepository + 'static,
    TR: TaskRepository + 'static,
    G: GitHubGateway + 'static,
    C: Clock + Send + Sync + 'static,
{
    let limiter = RateLimiter::new(settings.rate_limit);
    Router::new()
        .route("/health", get(health))
        .route(
            "/projects",
            post(projects::create_project::<PR, TR, G, C>)
                .get(projects::list_projects::<PR, TR, G, C>),
        )
        .route(
            "/projects/{id}",
            get(projects::get_project::<PR, TR, G, C>)
                .put(projects::update_project::<PR, TR, G, C>)
                .delete(projects::remove_project::<PR, TR, G, C>),
        )
        .route(
            "/projects/{id}/tasks",
            post(tasks::create_task::<PR, TR, G, C>),
        )
        .route(
            "/projects/{id}/github/{username}",
            get(projects::attach_github_repos::<PR, TR, G, C>),
        )
        .route(
            "/tasks/{id}",
            put(tasks::update_task::<PR, TR, G, C>).delete(tasks::remove_task::<PR, TR, G, C>),
        )
        .layer(from_fn_with_state(limiter, rate_limit))
        .layer(cors_layer(&settings.cors_origins))
        .layer(CompressionLayer::new())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
