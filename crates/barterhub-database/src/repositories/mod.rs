//! Concrete repository implementations for every swap table.
//!
//! Reads go through the pool. Writes that belong to a multi-row transition
//! take a `&mut PgConnection` so the caller can run them inside one
//! transaction (`&mut *tx`).

pub mod listing;
pub mod message;
pub mod notification;
pub mod swap;
pub mod user;

pub use listing::ListingRepository;
pub use message::MessageRepository;
pub use notification::NotificationRepository;
pub use swap::SwapRepository;
pub use user::UserRepository;

use barterhub_core::error::{AppError, ErrorKind};

/// Postgres `query_canceled`, raised when `statement_timeout` fires.
const QUERY_CANCELED: &str = "57014";
/// Postgres `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";

/// Map a sqlx error to an [`AppError`], classifying timeouts and
/// uniqueness races.
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |err| {
        let kind = match &err {
            sqlx::Error::PoolTimedOut => ErrorKind::StorageTimeout,
            sqlx::Error::Database(db) if db.code().as_deref() == Some(QUERY_CANCELED) => {
                ErrorKind::StorageTimeout
            }
            sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
                ErrorKind::Conflict
            }
            _ => ErrorKind::Database,
        };
        AppError::with_source(kind, context, err)
    }
}
