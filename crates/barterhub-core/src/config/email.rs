//! Outbound email configuration.

use serde::{Deserialize, Serialize};

/// Which transport carries outbound email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EmailProvider {
    /// Deliver through an SMTP relay.
    Smtp,
    /// Write the email to the log instead of sending it.
    #[default]
    Log,
}

/// SMTP relay and delivery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Transport selection.
    #[serde(default)]
    pub provider: EmailProvider,
    /// SMTP server hostname.
    #[serde(default)]
    pub smtp_host: String,
    /// SMTP server port (STARTTLS).
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// Optional SMTP username.
    #[serde(default)]
    pub smtp_user: Option<String>,
    /// Optional SMTP password.
    #[serde(default)]
    pub smtp_password: Option<String>,
    /// RFC 5322 "From" address.
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Upper bound for a single delivery attempt, in seconds.
    #[serde(default = "default_send_timeout")]
    pub send_timeout_seconds: u64,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            provider: EmailProvider::default(),
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_user: None,
            smtp_password: None,
            from_address: default_from_address(),
            send_timeout_seconds: default_send_timeout(),
        }
    }
}

impl EmailConfig {
    /// SMTP login, when both parts are set and non-blank.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        let user = self.smtp_user.as_deref().filter(|u| !u.trim().is_empty())?;
        let pass = self.smtp_password.as_deref().filter(|p| !p.is_empty())?;
        Some((user, pass))
    }
}

fn default_smtp_port() -> u16 {
    587
}

fn default_from_address() -> String {
    "noreply@barterhub.local".to_string()
}

fn default_send_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_credentials_are_ignored() {
        let mut config = EmailConfig {
            smtp_user: Some(String::new()),
            smtp_password: Some(String::new()),
            ..EmailConfig::default()
        };
        assert!(config.credentials().is_none());

        config.smtp_user = Some("relay".to_string());
        assert!(config.credentials().is_none());

        config.smtp_password = Some("hunter2".to_string());
        assert_eq!(config.credentials(), Some(("relay", "hunter2")));
    }
}
