//! Swap proposal repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use barterhub_core::result::AppResult;
use barterhub_core::types::{PageRequest, PageResponse, ProposalId, UserId};
use barterhub_entity::swap::{NewProposal, ProposalStatus, SwapProposal, SwapProposalRow};

use super::db_error;

/// Repository for `swap_requests` rows.
#[derive(Debug, Clone)]
pub struct SwapRepository {
    pool: PgPool,
}

impl SwapRepository {
    /// Create a new swap repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a proposal by ID.
    pub async fn find_by_id(&self, id: ProposalId) -> AppResult<Option<SwapProposal>> {
        sqlx::query_as::<_, SwapProposalRow>("SELECT * FROM swap_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find swap request"))?
            .map(SwapProposal::try_from)
            .transpose()
    }

    /// Proposals sent or received by a user, newest first.
    pub async fn list_for_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> AppResult<PageResponse<SwapProposal>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM swap_requests WHERE requester_id = $1 OR requested_owner_id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to count swap requests"))?;

        let rows = sqlx::query_as::<_, SwapProposalRow>(
            "SELECT * FROM swap_requests WHERE requester_id = $1 OR requested_owner_id = $1 \
             ORDER BY created_at DESC, id DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list swap requests"))?;

        let proposals = rows
            .into_iter()
            .map(SwapProposal::try_from)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(PageResponse::new(proposals, page, total as u64))
    }

    /// Insert a proposal row.
    pub async fn insert(conn: &mut PgConnection, new: &NewProposal) -> AppResult<SwapProposal> {
        let (is_money_offer, offered_id, offered_kind, money) = new.offer.columns();
        let row = sqlx::query_as::<_, SwapProposalRow>(
            "INSERT INTO swap_requests (requester_id, requested_id, requested_kind, requested_owner_id, \
             is_money_offer, offered_id, offered_kind, money_amount_cents, \
             requested_status_snapshot, offered_status_snapshot, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11) RETURNING *",
        )
        .bind(new.requester_id)
        .bind(new.requested_id)
        .bind(new.requested_kind)
        .bind(new.requested_owner_id)
        .bind(is_money_offer)
        .bind(offered_id)
        .bind(offered_kind)
        .bind(money)
        .bind(new.requested_status_snapshot)
        .bind(new.offered_status_snapshot)
        .bind(new.created_at)
        .fetch_one(conn)
        .await
        .map_err(db_error("Failed to insert swap request"))?;
        SwapProposal::try_from(row)
    }

    /// Load a proposal inside a transaction.
    pub async fn find_in(
        conn: &mut PgConnection,
        id: ProposalId,
    ) -> AppResult<Option<SwapProposal>> {
        sqlx::query_as::<_, SwapProposalRow>("SELECT * FROM swap_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(db_error("Failed to load swap request"))?
            .map(SwapProposal::try_from)
            .transpose()
    }

    /// Compare-and-set the status from `pending`. Returns affected rows.
    ///
    /// A row locked by a concurrent transition is re-checked after that
    /// transaction commits, so only one caller ever sees `1`.
    pub async fn transition_from_pending(
        conn: &mut PgConnection,
        id: ProposalId,
        to: ProposalStatus,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let closed_at = (to == ProposalStatus::Rejected).then_some(at);
        let result = sqlx::query(
            "UPDATE swap_requests SET status = $2, updated_at = $3, closed_at = $4 \
             WHERE id = $1 AND status = 'pending'",
        )
        .bind(id)
        .bind(to)
        .bind(at)
        .bind(closed_at)
        .execute(conn)
        .await
        .map_err(db_error("Failed to update swap request status"))?;
        Ok(result.rows_affected())
    }

    /// Current status, read inside a transaction.
    pub async fn status_of(
        conn: &mut PgConnection,
        id: ProposalId,
    ) -> AppResult<Option<ProposalStatus>> {
        sqlx::query_scalar::<_, ProposalStatus>("SELECT status FROM swap_requests WHERE id = $1")
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(db_error("Failed to read swap request status"))
    }

    /// Bump `updated_at` when the thread sees activity.
    pub async fn touch(conn: &mut PgConnection, id: ProposalId, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query("UPDATE swap_requests SET updated_at = $2 WHERE id = $1")
            .bind(id)
            .bind(at)
            .execute(conn)
            .await
            .map_err(db_error("Failed to touch swap request"))?;
        Ok(())
    }
}
