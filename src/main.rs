use std::net::SocketAddr;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use civicsync_triage::app_state::AppState;
use civicsync_triage::config::Config;
use civicsync_triage::handlers;
use civicsync_triage::openapi;
use civicsync_triage::upstream::UpstreamClient;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "civicsync_triage=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("starting civicsync-triage");
    let cfg = Config::from_env()?;
    tracing::info!("report store at {}", cfg.upstream_base_url);
    tracing::info!("departments: {}", cfg.departments.join(", "));

    let upstream = UpstreamClient::new(&cfg)?;
    let state = AppState::new(upstream, cfg.departments.clone());

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.http_port));
    tracing::info!("civicsync-triage binding on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server shutdown complete");
    Ok(())
}

fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/board", get(handlers::board::get_board))
        .route("/api/v1/board/move", post(handlers::board::move_report))
        .route("/api/v1/board/refresh", post(handlers::board::refresh_board))
        .route("/api/v1/analytics", get(handlers::analytics::get_analytics))
        .route("/api/v1/stats", get(handlers::analytics::get_stats))
        .merge(openapi::routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("received terminate signal, shutting down gracefully...");
        },
    }
}
