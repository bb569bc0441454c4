//! Application builder: wires router, state, worker and shutdown together.

use std::sync::Arc;

use axum::Router;

use officehub_core::config::AppConfig;
use officehub_core::error::AppError;
use officehub_database::DatabasePool;
use officehub_worker::{AnnouncementPublishJob, CronScheduler, NotificationCleanupJob};

use crate::router::build_router;
use crate::state::{AppState, Stores};

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the OfficeHub server until SIGINT or SIGTERM.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting OfficeHub server...");

    // ── Step 1: Database ─────────────────────────────────────────
    let db = DatabasePool::connect(&config.database).await?;
    db.migrate().await?;

    // ── Step 2: Services and real-time engine ────────────────────
    let stores = Stores::postgres(&db);
    let state = AppState::new(config.clone(), Some(db.clone()), stores, None)?;

    // ── Step 3: Scheduled jobs ───────────────────────────────────
    let mut scheduler = if config.worker.enabled {
        let scheduler = CronScheduler::new(config.worker.clone()).await?;
        let cleanup = Arc::new(NotificationCleanupJob::new(
            state.notifications.clone(),
            config.notifications.retention_days,
        ));
        let publish = Arc::new(AnnouncementPublishJob::new(
            state.announcements.clone(),
            state.realtime.bridge.clone(),
        ));
        scheduler.register_default_tasks(cleanup, publish).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Worker disabled, scheduled jobs will not run");
        None
    };

    // ── Step 4: HTTP server ──────────────────────────────────────
    let realtime = state.realtime.clone();
    let app = build_app(state);
    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("OfficeHub server listening on {}", addr);

    let connections = realtime.connections.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            // Upgraded sockets keep the server alive until they close.
            connections.close_all();
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 5: Teardown ─────────────────────────────────────────
    if let Some(scheduler) = scheduler.as_mut() {
        if let Err(e) = scheduler.shutdown().await {
            tracing::warn!(error = %e, "Scheduler shutdown failed");
        }
    }
    realtime.shutdown();
    db.close().await;

    tracing::info!("OfficeHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
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
