//! # barterhub-api
//!
//! HTTP API layer for BarterHub built on Axum.
//!
//! Provides the swap, notification and messaging endpoints, middleware
//! (request logging, CORS, timeouts), extractors, DTOs, and error mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
