//! Application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use weightshare_core::config::AppConfig;
use weightshare_core::error::AppError;
use weightshare_core::traits::{Clock, SystemClock};
use weightshare_database::ShareStoreManager;
use weightshare_worker::{ExpiredShareSweeper, SweepScheduler};

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);
    build_router(state)
        .layer(build_compression_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the WeightShare server until Ctrl+C or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting WeightShare server...");

    // ── Step 1: Share store ──────────────────────────────────────
    tracing::info!(backend = ?config.database.backend, "Initializing share store");
    let manager = ShareStoreManager::new(&config.database)?;
    if config.database.auto_migrate {
        manager.migrate().await?;
    }
    let store = manager.store();
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // ── Step 2: Expiry sweep ─────────────────────────────────────
    let mut scheduler = if config.worker.sweep_enabled {
        let sweeper = ExpiredShareSweeper::new(Arc::clone(&store), Arc::clone(&clock));
        let scheduler = SweepScheduler::new().await?;
        scheduler
            .register_sweep(&config.worker.sweep_schedule, sweeper)
            .await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Expired share sweep disabled");
        None
    };

    // ── Step 3: HTTP server ──────────────────────────────────────
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let addr = config.server.bind_address();
    let app = build_app(AppState::new(config, store, clock));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("WeightShare server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .await
    });

    let result = tokio::select! {
        joined = server => match joined {
            Ok(served) => served.map_err(AppError::from),
            Err(e) => Err(AppError::internal(format!("Server task failed: {}", e))),
        },
        _ = async {
            let _ = shutdown_rx.wait_for(|stop| *stop).await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed, dropping open connections");
            Ok(())
        }
    };

    // ── Step 4: Teardown ─────────────────────────────────────────
    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!(error = %e, "Failed to stop sweep scheduler");
        }
    }
    manager.close().await;
    tracing::info!("WeightShare server stopped");

    result
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
