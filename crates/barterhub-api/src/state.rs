//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::{Duration, Instant};

use barterhub_auth::JwtDecoder;
use barterhub_core::config::AppConfig;
use barterhub_core::traits::{Clock, EmailTransport};
use barterhub_database::store::{MessageStore, SwapStore};
use barterhub_service::{
    MessagingService, NotificationDispatcher, NotificationService, StoreDeadline, SwapService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Process start, for the health endpoint
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// Store handle used for health pings
    pub store: Arc<dyn SwapStore>,
    /// Email dispatcher, drained at shutdown
    pub dispatcher: NotificationDispatcher,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Swap proposal service
    pub swap_service: Arc<SwapService>,
    /// Notification ledger service
    pub notification_service: Arc<NotificationService>,
    /// Messaging service
    pub messaging_service: Arc<MessagingService>,
}

impl AppState {
    /// Wire services over the given store, mail transport and clock.
    pub fn new(
        config: AppConfig,
        swaps: Arc<dyn SwapStore>,
        messages: Arc<dyn MessageStore>,
        transport: Arc<dyn EmailTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let deadline = StoreDeadline::from_millis(config.database.statement_timeout_ms);
        let dispatcher = NotificationDispatcher::new(
            transport,
            Duration::from_secs(config.email.send_timeout_seconds),
        );

        let swap_service = Arc::new(SwapService::new(
            Arc::clone(&swaps),
            dispatcher.clone(),
            Arc::clone(&clock),
            config.swap.clone(),
            deadline,
        ));
        let notification_service =
            Arc::new(NotificationService::new(Arc::clone(&swaps), deadline));
        let messaging_service = Arc::new(MessagingService::new(
            Arc::clone(&swaps),
            messages,
            clock,
            deadline,
        ));
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

        Self {
            config: Arc::new(config),
            started_at: Instant::now(),
            store: swaps,
            dispatcher,
            jwt_decoder,
            swap_service,
            notification_service,
            messaging_service,
        }
    }
}
