//! HTTP adapter for the order-management service.
//!
//! Translates JSON requests into `OrderService` calls and maps results and
//! absence onto HTTP status codes, with structured logging (tracing) and
//! Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

use std::sync::Arc;

use application::{OrderRepository, OrderService};
use axum::Router;
use axum::routing::{get, post};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::orders::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<R: OrderRepository + 'static>(
    state: Arc<AppState<R>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::system::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::system::health))
        .route("/orders", post(routes::orders::create::<R>))
        .route(
            "/orders/{order_id}",
            get(routes::orders::get::<R>).delete(routes::orders::cancel::<R>),
        )
        .route(
            "/orders/{order_id}/complete",
            post(routes::orders::complete::<R>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wires an order service on top of the given repository adapter.
pub fn create_state<R: OrderRepository + 'static>(repository: R) -> Arc<AppState<R>> {
    Arc::new(AppState {
        order_service: OrderService::new(repository),
    })
}
