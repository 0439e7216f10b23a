//! Transport that writes emails to the log instead of sending them.

use async_trait::async_trait;
use tracing::info;

use barterhub_core::result::AppResult;
use barterhub_core::traits::EmailTransport;
use barterhub_core::types::OutgoingEmail;

/// Logs every email at `info` and reports success.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogTransport;

impl LogTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailTransport for LogTransport {
    async fn send(&self, email: &OutgoingEmail) -> AppResult<()> {
        info!(
            to = %email.to,
            subject = %email.subject,
            body = %email.text,
            "Email not sent (log transport)"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
