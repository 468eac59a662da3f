use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::handler::HandlerWithoutStateExt;
use axum::http::StatusCode;
use axum::middleware::map_response;
use axum::response::{IntoResponse, Response};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

use crate::api::{self, ApiError, AppState};
use crate::config::ServerConfig;

/// Full application: API routes, static assets and middleware
pub fn app(state: AppState, server: &ServerConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let static_files =
        ServeDir::new(&server.static_dir).not_found_service(api::route_not_found.into_service());

    let router = api::router(state).nest_service("/static", static_files);

    with_timeout(
        router,
        Duration::from_secs(server.request_timeout_seconds.into()),
    )
    .layer(cors)
}

/// Abort requests that run longer than `timeout` with a JSON 408
pub fn with_timeout(router: Router, timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(map_response(timeout_error_body))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                timeout,
            )),
    )
}

async fn timeout_error_body(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        warn!("Request timed out");
        return ApiError::Timeout.into_response();
    }
    response
}

pub async fn run(server: &ServerConfig, state: AppState) -> Result<()> {
    let app = app(state, server);

    let addr = server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed to run")
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(e) => {
            warn!("Unable to listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}
