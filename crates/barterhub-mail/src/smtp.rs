//! Email delivery via an SMTP relay.

use async_trait::async_trait;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::debug;

use barterhub_core::config::EmailConfig;
use barterhub_core::result::AppResult;
use barterhub_core::traits::EmailTransport;
use barterhub_core::types::OutgoingEmail;

use crate::error::MailError;

/// Sends multipart (text + HTML) email through a STARTTLS relay.
#[derive(Debug, Clone)]
pub struct SmtpTransport {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpTransport {
    /// Build the relay client. No connection is opened until the first send.
    pub fn new(config: &EmailConfig) -> Result<Self, MailError> {
        let from: Mailbox = config.from_address.parse()?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port);
        if let Some((user, pass)) = config.credentials() {
            builder = builder.credentials(Credentials::new(user.to_string(), pass.to_string()));
        }

        Ok(Self {
            mailer: builder.build(),
            from,
        })
    }
}

/// Assemble a `multipart/alternative` message.
fn compose(from: &Mailbox, email: &OutgoingEmail) -> Result<Message, MailError> {
    let message = Message::builder()
        .from(from.clone())
        .to(email.to.parse()?)
        .subject(email.subject.clone())
        .multipart(MultiPart::alternative_plain_html(
            email.text.clone(),
            email.html.clone(),
        ))?;
    Ok(message)
}

#[async_trait]
impl EmailTransport for SmtpTransport {
    async fn send(&self, email: &OutgoingEmail) -> AppResult<()> {
        let message = compose(&self.from, email)?;
        self.mailer.send(message).await.map_err(MailError::from)?;
        debug!(to = %email.to, subject = %email.subject, "Email relayed via SMTP");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
