//! Notification repository implementation.

use sqlx::{PgConnection, PgPool};

use barterhub_core::result::AppResult;
use barterhub_core::types::{NotificationId, ProposalId, UserId};
use barterhub_entity::notification::{NewNotification, Notification};

use super::db_error;

/// Repository for the notification ledger.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a notification by ID.
    pub async fn find_by_id(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find notification"))
    }

    /// Open swap-proposal notifications for a user, newest first.
    pub async fn list_open(&self, user_id: UserId) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications \
             WHERE user_id = $1 AND kind = 'swap_proposal' AND accepted = FALSE AND closed = FALSE \
             ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list notifications"))
    }

    /// Count unread notifications for a user.
    pub async fn count_unread(&self, user_id: UserId) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count unread notifications"))
    }

    /// Mark a notification read if it belongs to `user_id`.
    pub async fn mark_read(&self, id: NotificationId, user_id: UserId) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE \
             WHERE id = $1 AND user_id = $2 AND is_read = FALSE",
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to mark notification read"))?;
        Ok(result.rows_affected())
    }

    /// Mark all notifications read for a user.
    pub async fn mark_all_read(&self, user_id: UserId) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(db_error("Failed to mark all notifications read"))?;
        Ok(result.rows_affected())
    }

    /// Insert a notification row.
    pub async fn insert(
        conn: &mut PgConnection,
        new: &NewNotification,
        swap_request_id: Option<ProposalId>,
    ) -> AppResult<Notification> {
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (user_id, kind, title, message, swap_request_id, \
             requested_id, requested_kind, offered_id, offered_kind, is_money_offer, \
             money_amount_cents, product_link, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING *",
        )
        .bind(new.user_id)
        .bind(new.kind)
        .bind(&new.title)
        .bind(&new.message)
        .bind(swap_request_id.or(new.swap_request_id))
        .bind(new.requested_id)
        .bind(new.requested_kind)
        .bind(new.offered_id)
        .bind(new.offered_kind)
        .bind(new.is_money_offer)
        .bind(new.money_amount_cents)
        .bind(&new.product_link)
        .bind(new.created_at)
        .fetch_one(conn)
        .await
        .map_err(db_error("Failed to create notification"))
    }

    /// Flag a swap-proposal notification accepted. Returns affected rows.
    pub async fn mark_accepted(conn: &mut PgConnection, id: NotificationId) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET accepted = TRUE WHERE id = $1 AND kind = 'swap_proposal'",
        )
        .bind(id)
        .execute(conn)
        .await
        .map_err(db_error("Failed to mark notification accepted"))?;
        Ok(result.rows_affected())
    }

    /// Close the swap-proposal notification of a rejected proposal.
    pub async fn close_for_proposal(
        conn: &mut PgConnection,
        proposal_id: ProposalId,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET closed = TRUE \
             WHERE swap_request_id = $1 AND kind = 'swap_proposal'",
        )
        .bind(proposal_id)
        .execute(conn)
        .await
        .map_err(db_error("Failed to close notification"))?;
        Ok(result.rows_affected())
    }
}
