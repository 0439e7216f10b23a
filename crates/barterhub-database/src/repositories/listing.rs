//! Listing repository implementation.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use barterhub_core::result::AppResult;
use barterhub_core::types::{ListingId, ProposalId};
use barterhub_entity::listing::{Listing, ListingKind, ListingStatus};

use super::db_error;

/// Repository for listing status transitions driven by swaps.
#[derive(Debug, Clone)]
pub struct ListingRepository {
    pool: PgPool,
}

impl ListingRepository {
    /// Create a new listing repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a listing by kind and id.
    pub async fn find(&self, kind: ListingKind, id: ListingId) -> AppResult<Option<Listing>> {
        sqlx::query_as::<_, Listing>("SELECT * FROM posts WHERE id = $1 AND kind = $2")
            .bind(id)
            .bind(kind)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find listing"))
    }

    /// Mark a listing swapped by a proposal. Returns affected rows (0 or 1).
    ///
    /// Misses when the listing is absent, of another kind, or already swapped.
    pub async fn mark_swapped(
        conn: &mut PgConnection,
        id: ListingId,
        kind: ListingKind,
        proposal_id: ProposalId,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE posts SET status = 'swapped', version = version + 1, \
             swapped_by_proposal = $3, updated_at = $4 \
             WHERE id = $1 AND kind = $2 AND status <> 'swapped'",
        )
        .bind(id)
        .bind(kind)
        .bind(proposal_id)
        .bind(at)
        .execute(conn)
        .await
        .map_err(db_error("Failed to mark listing swapped"))?;
        Ok(result.rows_affected())
    }

    /// Restore a listing swapped by `proposal_id` to `status`.
    pub async fn restore(
        conn: &mut PgConnection,
        id: ListingId,
        kind: ListingKind,
        proposal_id: ProposalId,
        status: ListingStatus,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE posts SET status = $4, version = version + 1, \
             swapped_by_proposal = NULL, updated_at = $5 \
             WHERE id = $1 AND kind = $2 AND swapped_by_proposal = $3",
        )
        .bind(id)
        .bind(kind)
        .bind(proposal_id)
        .bind(status)
        .bind(at)
        .execute(conn)
        .await
        .map_err(db_error("Failed to restore listing"))?;
        Ok(result.rows_affected())
    }
}
