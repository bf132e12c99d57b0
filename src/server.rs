//! Store selection, middleware and the serve loop.

use crate::config::{Settings, StorageBackend};
use crate::error::{AppError, ConfigError};
use crate::routes::app_router;
use crate::state::AppState;
use crate::store::{ensure_database_exists, ensure_tables, CatalogStore, MemoryStore, PgStore};
use axum::extract::Request;
use axum::{Router, ServiceExt};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::{
    limit::RequestBodyLimitLayer,
    normalize_path::{NormalizePath, NormalizePathLayer},
    trace::TraceLayer,
};

/// The served application. Trailing slashes are trimmed before routing, so
/// `/games/` and `/games` reach the same handler.
pub type App = NormalizePath<Router>;

/// Open the configured backend. For Postgres this creates the database and tables when missing.
pub async fn connect_store(settings: &Settings) -> Result<Arc<dyn CatalogStore>, AppError> {
    match settings.storage {
        StorageBackend::Memory => {
            tracing::warn!("using in-memory storage, data is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StorageBackend::Postgres => {
            let url = settings
                .database_url
                .as_deref()
                .ok_or_else(|| ConfigError::Missing("database_url".into()))?;
            ensure_database_exists(url).await?;
            let pool = PgPoolOptions::new()
                .max_connections(settings.max_connections)
                .connect(url)
                .await?;
            ensure_tables(&pool).await?;
            tracing::info!(max_connections = settings.max_connections, "connected to postgres");
            Ok(Arc::new(PgStore::new(pool)))
        }
    }
}

/// Router with request tracing and the body size limit applied.
pub fn build_app(state: AppState, settings: &Settings) -> App {
    let router = app_router(state)
        .layer(RequestBodyLimitLayer::new(settings.request_body_limit))
        .layer(TraceLayer::new_for_http());
    NormalizePathLayer::trim_trailing_slash().layer(router)
}

/// Bind and serve until the process stops. Production drains in-flight requests on Ctrl-C/SIGTERM.
pub async fn run(settings: &Settings, app: App) -> Result<(), AppError> {
    let listener = TcpListener::bind(settings.bind_address())
        .await
        .map_err(|e| AppError::Internal(format!("bind {}: {}", settings.bind_address(), e)))?;
    let addr = listener
        .local_addr()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    tracing::info!(environment = %settings.environment, "listening on http://{}", addr);

    let serve = axum::serve(listener, ServiceExt::<Request>::into_make_service(app));
    let result = if settings.environment.is_production() {
        serve.with_graceful_shutdown(shutdown_signal()).await
    } else {
        serve.await
    };
    result.map_err(|e| AppError::Internal(format!("server error: {}", e)))?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                term.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
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
    tracing::info!("shutdown signal received");
}
