//! Best-effort email delivery that never fails a state transition.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::task::TaskTracker;
use tracing::{info, warn};

use barterhub_core::traits::EmailTransport;
use barterhub_core::types::OutgoingEmail;

/// What happened to one delivery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Recipient address.
    pub to: String,
    /// Failure description, `None` when the email went out.
    pub failure: Option<String>,
}

impl DeliveryReport {
    pub fn delivered(&self) -> bool {
        self.failure.is_none()
    }
}

/// Wraps the email transport. All transport errors and timeouts are caught
/// and logged here; callers only ever see a [`DeliveryReport`].
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    transport: Arc<dyn EmailTransport>,
    send_timeout: Duration,
    tracker: TaskTracker,
}

impl NotificationDispatcher {
    /// Creates a dispatcher over a transport.
    pub fn new(transport: Arc<dyn EmailTransport>, send_timeout: Duration) -> Self {
        Self {
            transport,
            send_timeout,
            tracker: TaskTracker::new(),
        }
    }

    /// Send and wait for the outcome.
    pub async fn deliver(&self, email: OutgoingEmail) -> DeliveryReport {
        send_once(self.transport.as_ref(), self.send_timeout, &email).await
    }

    /// Send in the background; the caller continues immediately.
    pub fn spawn_delivery(&self, email: OutgoingEmail) {
        let transport = Arc::clone(&self.transport);
        let send_timeout = self.send_timeout;
        self.tracker.spawn(async move {
            send_once(transport.as_ref(), send_timeout, &email).await;
        });
    }

    /// Number of background deliveries still running.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Wait for background deliveries, up to `grace`.
    ///
    /// Returns `true` if everything finished in time.
    pub async fn drain(&self, grace: Duration) -> bool {
        self.tracker.close();
        let finished = tokio::time::timeout(grace, self.tracker.wait())
            .await
            .is_ok();
        self.tracker.reopen();
        if !finished {
            warn!(
                pending = self.tracker.len(),
                "Email deliveries still pending after grace period"
            );
        }
        finished
    }
}

async fn send_once(
    transport: &dyn EmailTransport,
    send_timeout: Duration,
    email: &OutgoingEmail,
) -> DeliveryReport {
    let failure = match tokio::time::timeout(send_timeout, transport.send(email)).await {
        Ok(Ok(())) => None,
        Ok(Err(e)) => Some(e.to_string()),
        Err(_) => Some(format!(
            "delivery timed out after {}s",
            send_timeout.as_secs()
        )),
    };

    match &failure {
        None => info!(
            to = %email.to,
            subject = %email.subject,
            transport = transport.name(),
            "Email sent"
        ),
        Some(reason) => warn!(
            to = %email.to,
            subject = %email.subject,
            transport = transport.name(),
            error = %reason,
            "Email delivery failed"
        ),
    }

    DeliveryReport {
        to: email.to.clone(),
        failure,
    }
}
