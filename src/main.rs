//! Service entry point: configuration, adapter wiring, and the HTTP listener.

use mockable::DefaultClock;
use projects_api::api::routes::router;
use projects_api::api::state::AppState;
use projects_api::cache::TtlCache;
use projects_api::config::AppConfig;
use projects_api::db::build_pool;
use projects_api::github::adapters::HttpGitHubGateway;
use projects_api::project::adapters::postgres::PostgresProjectRepository;
use projects_api::task::adapters::postgres::PostgresTaskRepository;
use std::error::Error;
use std::net::{Ipv4Addr, SocketAddr};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "fatal startup or runtime error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env()?;

    let pool = build_pool(&config.database_url)?;
    let clock = Arc::new(DefaultClock);
    let projects = Arc::new(PostgresProjectRepository::new(pool.clone()));
    let tasks = Arc::new(PostgresTaskRepository::new(pool));
    let gateway = Arc::new(HttpGitHubGateway::new(&config.github)?);
    let cache = Arc::new(TtlCache::new(
        config.cache.ttl,
        config.cache.enabled,
        Arc::clone(&clock),
    ));

    let state = AppState::new(projects, tasks, gateway, cache, clock);
    let app = router(state, &config.http);

    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Resolves on Ctrl-C or SIGTERM so in-flight requests can drain.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl-C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => tracing::error!(error = %err, "failed to install SIGTERM handler"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
