//! Mock order API HTTP server.
//!
//! Boot order: config, tracing, database pool, migrations, router, serve.
//! On SIGINT or SIGTERM the listener stops accepting, in-flight requests get
//! `SHUTDOWN_TIMEOUT` seconds to finish, then the pool is closed.

mod config;

use anyhow::Context;
use axum::Router;
use config::{Config, DEFAULT_LOG_FILTER};
use order_mock_core::OrderService;
use order_mock_core::environment::SystemClock;
use order_mock_postgres::PostgresRequestLogStore;
use order_mock_web::{AppState, build_router};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::oneshot;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();

    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&config.server.log_filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        host = %config.server.host,
        port = config.server.port,
        max_connections = config.database.max_connections,
        "Configuration loaded"
    );

    info!("Connecting to request log database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .acquire_timeout(config.connect_timeout())
        .connect(&config.database.url)
        .await
        .context("Failed to connect to PostgreSQL")?;
    let store = PostgresRequestLogStore::new(pool);
    info!("Request log database connected");

    store.migrate().await.context("Failed to run migrations")?;
    info!("Migrations applied");

    let service = OrderService::new(Arc::new(store.clone()), Arc::new(SystemClock));
    let app = build_router(AppState::new(service));

    serve(app, &config).await?;

    store.close().await;
    info!("Database pool closed, bye");

    Ok(())
}

/// Serve until a shutdown signal, then drain for at most the configured timeout.
async fn serve(app: Router, config: &Config) -> anyhow::Result<()> {
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!(address = %addr, "HTTP server started");
    info!(
        "Try it: http://localhost:{}/api/getOrder?id=1",
        config.server.port
    );

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        let _ = stop_rx.await;
    });
    let mut server = tokio::spawn(server.into_future());

    tokio::select! {
        result = &mut server => {
            return result.context("HTTP server task failed")?.context("HTTP server error");
        }
        () = shutdown_signal() => {}
    }

    let _ = stop_tx.send(());
    if let Ok(result) = tokio::time::timeout(config.shutdown_timeout(), &mut server).await {
        result.context("HTTP server task failed")?.context("HTTP server error")?;
        info!("In-flight requests drained");
    } else {
        warn!(
            timeout_secs = config.server.shutdown_timeout,
            "Shutdown timeout elapsed, dropping remaining connections"
        );
        server.abort();
    }

    Ok(())
}

/// Graceful shutdown signal handler.
///
/// Waits for:
/// - Ctrl+C (SIGINT)
/// - SIGTERM (on unix)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
