//! Message repository implementation.

use sqlx::{PgConnection, PgPool};

use barterhub_core::result::AppResult;
use barterhub_core::types::{ProposalId, UserId};
use barterhub_entity::message::{Conversation, NewMessage, ThreadMessage};

use super::db_error;

/// Repository for swap chat messages.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a message row and return it with the sender's name.
    pub async fn insert(conn: &mut PgConnection, new: &NewMessage) -> AppResult<ThreadMessage> {
        sqlx::query_as::<_, ThreadMessage>(
            "WITH m AS ( \
                 INSERT INTO messages (swap_request_id, sender_id, receiver_id, body, attachments, created_at) \
                 VALUES ($1, $2, $3, $4, $5, $6) RETURNING * \
             ) \
             SELECT m.*, TRIM(u.first_name || ' ' || u.last_name) AS sender_name \
             FROM m JOIN users u ON u.id = m.sender_id",
        )
        .bind(new.swap_request_id)
        .bind(new.sender_id)
        .bind(new.receiver_id)
        .bind(&new.body)
        .bind(&new.attachments)
        .bind(new.created_at)
        .fetch_one(conn)
        .await
        .map_err(db_error("Failed to insert message"))
    }

    /// Messages of a thread in chronological order; `id` breaks timestamp ties.
    pub async fn list_for_proposal(
        &self,
        proposal_id: ProposalId,
    ) -> AppResult<Vec<ThreadMessage>> {
        sqlx::query_as::<_, ThreadMessage>(
            "SELECT m.*, TRIM(u.first_name || ' ' || u.last_name) AS sender_name \
             FROM messages m JOIN users u ON u.id = m.sender_id \
             WHERE m.swap_request_id = $1 \
             ORDER BY m.created_at ASC, m.id ASC",
        )
        .bind(proposal_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list messages"))
    }

    /// Mark unread messages addressed to `reader` as read.
    pub async fn mark_read(&self, proposal_id: ProposalId, reader: UserId) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE messages SET is_read = TRUE \
             WHERE swap_request_id = $1 AND receiver_id = $2 AND is_read = FALSE",
        )
        .bind(proposal_id)
        .bind(reader)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to mark messages read"))?;
        Ok(result.rows_affected())
    }

    /// Count unread messages addressed to a user.
    pub async fn count_unread(&self, user_id: UserId) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count unread messages"))
    }

    /// Inbox overview: latest message first, silent threads last.
    pub async fn conversations(&self, user_id: UserId) -> AppResult<Vec<Conversation>> {
        sqlx::query_as::<_, Conversation>(
            "SELECT s.id AS swap_request_id, \
                    u.id AS other_user_id, \
                    TRIM(u.first_name || ' ' || u.last_name) AS other_user_name, \
                    p.title AS listing_title, \
                    lm.body AS last_message, \
                    lm.created_at AS last_message_at, \
                    (SELECT COUNT(*) FROM messages m \
                      WHERE m.swap_request_id = s.id AND m.receiver_id = $1 AND m.is_read = FALSE) \
                      AS unread_count, \
                    s.updated_at \
             FROM swap_requests s \
             JOIN posts p ON p.id = s.requested_id \
             JOIN users u ON u.id = CASE WHEN s.requester_id = $1 \
                                         THEN s.requested_owner_id ELSE s.requester_id END \
             LEFT JOIN LATERAL ( \
                 SELECT body, created_at FROM messages m \
                 WHERE m.swap_request_id = s.id \
                 ORDER BY m.created_at DESC, m.id DESC LIMIT 1 \
             ) lm ON TRUE \
             WHERE s.requester_id = $1 OR s.requested_owner_id = $1 \
             ORDER BY lm.created_at DESC NULLS LAST, s.updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list conversations"))
    }
}
