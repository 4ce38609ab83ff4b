//! Events Palour host API
//!
//! HTTP layer built with Axum. It serves the dashboard view models as JSON
//! and the built UI for every other path.
//!
//! # Endpoints
//!
//! ## Report
//! - `GET /api/v1/report/purchases` - Purchase Report view model
//! - `GET /api/v1/report/chart?width=&height=` - Spending chart geometry
//!
//! ## Event Map
//! - `GET /api/v1/events` - Event pins with colours
//! - `GET /api/v1/events/map` - Markers and overlay entries
//! - `GET /api/v1/map/assets` - Mapping library assets and load policy
//!
//! ## Pages
//! - `GET /api/v1/pages` - All pages
//! - `GET /api/v1/pages/:slug` - Page metadata
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use palour::api::{serve, ApiConfig, AppState};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let state = AppState::new(ApiConfig::new("127.0.0.1", 8085));
//!     serve(state).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState, MapSettings};

use axum::{http::HeaderValue, routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Report routes
        .route("/report/purchases", get(routes::report::purchase_report))
        .route("/report/chart", get(routes::report::spending_chart))
        // Event map routes
        .route("/events", get(routes::events::list_events))
        .route("/events/map", get(routes::events::event_map))
        .route("/map/assets", get(routes::events::map_assets))
        // Page routes
        .route("/pages", get(routes::pages::list_pages))
        .route("/pages/:slug", get(routes::pages::get_page));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let static_dir = state.config.static_dir.clone();

    let shared_state = Arc::new(state);

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes);

    // Serve the built UI; unknown paths get index.html so client routes resolve
    if let Some(dir) = static_dir.filter(|d| d.is_dir()) {
        tracing::info!("Serving UI from {:?}", dir);
        let index = ServeFile::new(dir.join("index.html"));
        router = router.fallback_service(ServeDir::new(dir).fallback(index));
    }

    router
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(shared_state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Start the host server
pub async fn serve(state: AppState) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Events Palour listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Events Palour shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
