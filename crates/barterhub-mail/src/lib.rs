//! # barterhub-mail
//!
//! Implementations of [`barterhub_core::traits::EmailTransport`]:
//! an SMTP relay transport, a transport that only logs, and a recording
//! transport for tests.

pub mod error;
pub mod log;
pub mod recording;
pub mod smtp;

use std::sync::Arc;

use barterhub_core::config::{EmailConfig, EmailProvider};
use barterhub_core::result::AppResult;
use barterhub_core::traits::EmailTransport;

pub use error::MailError;
pub use log::LogTransport;
pub use recording::RecordingTransport;
pub use smtp::SmtpTransport;

/// Build the transport selected by `email.provider`.
pub fn build_transport(config: &EmailConfig) -> AppResult<Arc<dyn EmailTransport>> {
    match config.provider {
        EmailProvider::Smtp => Ok(Arc::new(SmtpTransport::new(config)?)),
        EmailProvider::Log => Ok(Arc::new(LogTransport::new())),
    }
}
