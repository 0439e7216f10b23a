//! Chat message model.

use barterhub_core::types::{MessageId, ProposalId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A message exchanged between the two participants of a proposal.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier; also the ordering tie-break.
    pub id: MessageId,
    /// The proposal thread.
    pub swap_request_id: ProposalId,
    /// Author.
    pub sender_id: UserId,
    /// The other participant.
    pub receiver_id: UserId,
    /// Message text.
    pub body: String,
    /// Attachment URLs.
    pub attachments: Vec<String>,
    /// Whether the receiver has read it.
    pub is_read: bool,
    /// When the message was sent.
    pub created_at: DateTime<Utc>,
}

/// A message together with its author's display name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ThreadMessage {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub message: Message,
    pub sender_name: String,
}

/// Data required to insert a new message.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub swap_request_id: ProposalId,
    pub sender_id: UserId,
    pub receiver_id: UserId,
    pub body: String,
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
}
