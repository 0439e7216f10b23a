//! Upper bound on individual store operations.

use std::future::Future;
use std::time::Duration;

use tracing::error;

use barterhub_core::error::AppError;
use barterhub_core::result::AppResult;

/// Fails a store call with `StorageTimeout` once it exceeds the limit.
///
/// A timed-out future is dropped; an open transaction inside it rolls back.
#[derive(Debug, Clone, Copy)]
pub struct StoreDeadline {
    limit: Duration,
}

impl StoreDeadline {
    pub fn new(limit: Duration) -> Self {
        Self { limit }
    }

    /// Build from `database.statement_timeout_ms`.
    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Await `fut`, giving up after the limit.
    pub async fn run<T, F>(&self, operation: &'static str, fut: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        match tokio::time::timeout(self.limit, fut).await {
            Ok(result) => result,
            Err(_) => {
                error!(
                    operation,
                    limit_ms = self.limit.as_millis() as u64,
                    "Store operation timed out"
                );
                Err(AppError::storage_timeout(format!(
                    "{operation} exceeded {}ms",
                    self.limit.as_millis()
                )))
            }
        }
    }
}
