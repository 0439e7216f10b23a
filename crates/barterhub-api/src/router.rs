//! Route definitions for the BarterHub HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);
    let cors = middleware::cors::build_cors_layer(&state.config.server.cors);

    let api_routes = Router::new()
        .merge(swap_routes())
        .merge(notification_routes())
        .merge(message_routes())
        .merge(health_routes());

    Router::new()
        .nest("/api", api_routes)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Proposal lifecycle
fn swap_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/swap-requests",
            post(handlers::swap::create).get(handlers::swap::list),
        )
        .route("/swap-requests/{id}", get(handlers::swap::get))
        .route(
            "/swap-requests/accept/{notification_id}",
            post(handlers::swap::accept),
        )
        .route(
            "/swap-requests/reject/{request_id}",
            post(handlers::swap::reject),
        )
}

/// Notification ledger
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/notifications/unread-count",
            get(handlers::notification::unread_count),
        )
        .route(
            "/notifications/read-all",
            put(handlers::notification::mark_all_read),
        )
        .route(
            "/notifications/{id}",
            get(handlers::notification::list_open),
        )
        .route(
            "/notifications/{id}/read",
            put(handlers::notification::mark_read),
        )
        .route(
            "/notifications/{id}/reject",
            post(handlers::notification::reject),
        )
}

/// Per-proposal chat
fn message_routes() -> Router<AppState> {
    Router::new()
        .route("/messages", post(handlers::message::send))
        .route("/messages/read", put(handlers::message::mark_read))
        .route(
            "/messages/unread-count",
            get(handlers::message::unread_count),
        )
        .route(
            "/messages/conversations",
            get(handlers::message::conversations),
        )
        .route(
            "/messages/swap-request/{id}",
            get(handlers::message::list),
        )
}

/// Liveness
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}
