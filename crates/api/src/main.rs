use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clubsite_api::auth::session::SessionStore;
use clubsite_api::background::session_purge;
use clubsite_api::config::{LogFormat, ServerConfig, StorageConfig};
use clubsite_api::router::build_app_router;
use clubsite_api::state::AppState;
use clubsite_db::{ContentStore, JsonFileStore, PgStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "clubsite_api=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);
    match LogFormat::from_env() {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Storage ---
    let store = open_store(&config.storage).await?;
    tracing::info!(backend = store.backend_name(), "Content store ready");

    if config.admin.password_hash.is_none() {
        tracing::warn!("No admin password configured; admin login is disabled");
    }

    // --- Sessions ---
    let sessions = Arc::new(SessionStore::new(config.admin.session_ttl()));
    let purge_cancel = CancellationToken::new();
    let purge_handle = tokio::spawn(session_purge::run(
        Arc::clone(&sessions),
        session_purge::PURGE_INTERVAL,
        purge_cancel.clone(),
    ));

    // --- App state ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        sessions,
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    purge_cancel.cancel();
    let _ = tokio::time::timeout(Duration::from_secs(5), purge_handle).await;
    tracing::info!("Session purge job stopped");

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Open the configured storage backend.
///
/// Postgres is used when `DATABASE_URL` is set; otherwise the server runs
/// in fallback mode against JSON files.
async fn open_store(storage: &StorageConfig) -> anyhow::Result<Arc<dyn ContentStore>> {
    match storage {
        StorageConfig::Postgres { database_url } => {
            let pool = clubsite_db::create_pool(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connection pool created");

            clubsite_db::health_check(&pool)
                .await
                .context("Database health check failed")?;
            tracing::info!("Database health check passed");

            clubsite_db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgStore::new(pool)))
        }
        StorageConfig::JsonFile { data_dir } => {
            tracing::warn!(
                data_dir = %data_dir.display(),
                "DATABASE_URL not set; running in fallback mode with JSON file storage"
            );
            let store = JsonFileStore::open(data_dir.clone())
                .await
                .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
            Ok(Arc::new(store))
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
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
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
