//! User profile model.

use barterhub_core::types::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Contact-level view of a user row.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    /// Unique user identifier.
    pub id: UserId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Email address used for swap notifications.
    pub email: String,
    /// Phone number, if the user shared one.
    pub phone: Option<String>,
    /// City or area.
    pub location: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Full name shown to other users.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
