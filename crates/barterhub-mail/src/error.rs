//! Mail transport errors.

use barterhub_core::error::{AppError, ErrorKind};

/// Error type for email delivery failures.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed.
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("Email build error: {0}")]
    Build(#[from] lettre::error::Error),

    /// A simulated failure from a test transport.
    #[error("Simulated delivery failure: {0}")]
    Simulated(String),
}

impl From<MailError> for AppError {
    fn from(err: MailError) -> Self {
        let kind = match &err {
            MailError::Address(_) => ErrorKind::Validation,
            _ => ErrorKind::EmailDispatch,
        };
        AppError::with_source(kind, err.to_string(), err)
    }
}
