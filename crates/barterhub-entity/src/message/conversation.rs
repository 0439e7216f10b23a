//! Conversation overview row.

use barterhub_core::types::{ProposalId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One swap thread as seen from a participant's inbox.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Conversation {
    /// The proposal the thread belongs to.
    pub swap_request_id: ProposalId,
    /// The participant on the other side.
    pub other_user_id: UserId,
    /// Display name of the other participant.
    pub other_user_name: String,
    /// Title of the requested listing.
    pub listing_title: String,
    /// Body of the latest message.
    pub last_message: Option<String>,
    /// When the latest message was sent.
    pub last_message_at: Option<DateTime<Utc>>,
    /// Messages addressed to the caller that are still unread.
    pub unread_count: i64,
    /// Proposal's last activity.
    pub updated_at: DateTime<Utc>,
}
