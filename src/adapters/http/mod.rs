//! HTTP transport for the availability service.
//!
//! Routes:
//! - `GET  /health`: liveness check returning `{ "ok": true }`
//! - `GET  /api/availability/stats`: platform-wide aggregate
//! - `GET  /api/availability/:id`: availability snapshot for one property
//! - `POST /api/availability/batch`: snapshots for up to 50 properties
//! - `PUT  /api/availability/:id`: manual room-count update
//! - `DELETE /api/availability/:id/cache`: drop the cached snapshot

pub mod error;
pub mod handlers;

use crate::core::AvailabilityService;
use crate::domain::ports::{CacheStore, PropertyStore};
use crate::utils::error::{AvailabilityError, Result};
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal::ctrl_c;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builds the application router. The static `/stats` segment is matched
/// ahead of the `:id` capture, so no property may be named `stats`.
pub fn router<S, C>(
    service: Arc<AvailabilityService<S, C>>,
    cors_allowed_origin: &str,
) -> Result<Router>
where
    S: PropertyStore + 'static,
    C: CacheStore + 'static,
{
    let app = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/availability/stats", get(handlers::get_stats))
        .route(
            "/api/availability/:id",
            get(handlers::get_availability).put(handlers::update_availability),
        )
        .route(
            "/api/availability/batch",
            post(handlers::get_multiple_availability),
        )
        .route(
            "/api/availability/:id/cache",
            delete(handlers::clear_cache),
        )
        .layer(cors_layer(cors_allowed_origin)?)
        .layer(TraceLayer::new_for_http())
        .with_state(service);

    Ok(app)
}

/// Serves the API until SIGINT or SIGTERM arrives.
pub async fn serve<S, C>(
    service: Arc<AvailabilityService<S, C>>,
    addr: &str,
    cors_allowed_origin: &str,
) -> Result<()>
where
    S: PropertyStore + 'static,
    C: CacheStore + 'static,
{
    let app = router(service, cors_allowed_origin)?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    if allowed_origin == "*" {
        return Ok(cors.allow_origin(Any));
    }
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .map_err(|_| AvailabilityError::ConfigError {
            message: format!("invalid CORS origin: {}", allowed_origin),
        })?;
    Ok(cors.allow_origin(origin))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        tracing::info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
