//! # barterhub-database
//!
//! PostgreSQL connection management, repositories for every swap table,
//! and the [`SwapStore`] / [`MessageStore`] seams consumed by the service
//! layer. [`MemoryStore`] implements the same seams without a database.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{AcceptOutcome, AcceptPlan, MessageStore, RejectOutcome, RejectPlan, SwapStore};
