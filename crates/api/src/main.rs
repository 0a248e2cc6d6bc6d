//! API server entry point.

use api::config::Config;
use application::OrderRepository;
use metrics_exporter_prometheus::PrometheusHandle;
use order_store::{InMemoryOrderRepository, PostgresOrderRepository};
use tokio::signal;

/// Waits for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("received SIGINT, starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("received SIGTERM, starting graceful shutdown");
        }
    }
}

/// Serves the API on top of the given repository adapter until shutdown.
async fn serve<R: OrderRepository + 'static>(
    config: &Config,
    repository: R,
    metrics_handle: PrometheusHandle,
) -> std::io::Result<()> {
    let state = api::create_state(repository);
    let app = api::create_app(state, metrics_handle);

    let addr = config.addr();
    tracing::info!(%addr, "starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    api::telemetry::init_tracing(&config);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Pick the storage adapter and serve
    let result = match config.database_url.as_deref() {
        Some(database_url) => {
            let repository = PostgresOrderRepository::connect(database_url)
                .await
                .expect("failed to connect to database");
            repository
                .run_migrations()
                .await
                .expect("failed to run migrations");
            tracing::info!("using postgres order repository");
            serve(&config, repository, metrics_handle).await
        }
        None => {
            tracing::info!("using in-memory order repository");
            serve(&config, InMemoryOrderRepository::new(), metrics_handle).await
        }
    };

    result.expect("server error");
    tracing::info!("server shut down gracefully");
}
