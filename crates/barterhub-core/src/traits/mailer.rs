//! Email transport trait for pluggable delivery backends.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::OutgoingEmail;

/// Trait for outbound email backends (SMTP relay, log sink, test recorder).
///
/// Implementations report failures as `ErrorKind::EmailDispatch`. Callers in
/// the service layer never let those errors escape a state transition.
#[async_trait]
pub trait EmailTransport: Send + Sync + std::fmt::Debug + 'static {
    /// Deliver a single email.
    async fn send(&self, email: &OutgoingEmail) -> AppResult<()>;

    /// Short transport name used in log fields.
    fn name(&self) -> &'static str;
}
