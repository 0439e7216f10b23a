//! BarterHub Server: swap negotiation backend for the barter marketplace.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use barterhub_api::AppState;
use barterhub_core::config::{AppConfig, StoreProvider};
use barterhub_core::error::AppError;
use barterhub_core::traits::SystemClock;
use barterhub_database::store::{MessageStore, SwapStore};
use barterhub_database::{DatabasePool, MemoryStore, PgStore};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("BARTERHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting BarterHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Open the store ───────────────────────────────────
    tracing::info!(provider = %config.database.provider, "Opening store...");
    let (swaps, messages, db_pool) = match config.database.provider {
        StoreProvider::Postgres => {
            let db_pool = DatabasePool::connect(&config.database).await?;
            if config.database.run_migrations {
                tracing::info!("Running database migrations...");
                barterhub_database::migration::run_migrations(db_pool.pool()).await?;
                tracing::info!("Database migrations complete");
            }
            let store = Arc::new(PgStore::new(db_pool.clone()));
            let swaps: Arc<dyn SwapStore> = store.clone();
            let messages: Arc<dyn MessageStore> = store;
            (swaps, messages, Some(db_pool))
        }
        StoreProvider::Memory => {
            tracing::warn!("Using the in-memory store; data is lost on exit");
            let store = Arc::new(MemoryStore::new());
            let swaps: Arc<dyn SwapStore> = store.clone();
            let messages: Arc<dyn MessageStore> = store;
            (swaps, messages, None)
        }
    };

    // ── Step 2: Mail transport ───────────────────────────────────
    let transport = barterhub_mail::build_transport(&config.email)?;
    tracing::info!(transport = transport.name(), "Email transport ready");

    // ── Step 3: Services and router ──────────────────────────────
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, swaps, messages, transport, Arc::new(SystemClock));
    let dispatcher = state.dispatcher.clone();
    let app = barterhub_api::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("BarterHub server listening on {}", addr);

    // ── Step 4: Serve until a shutdown signal ────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    // ── Step 5: Drain emails and close the pool ──────────────────
    tracing::info!(
        pending = dispatcher.in_flight(),
        "Waiting for email deliveries to complete..."
    );
    dispatcher.drain(grace).await;

    if let Some(db_pool) = db_pool {
        db_pool.close().await;
    }

    tracing::info!("BarterHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
