//! Listing entity model.

use barterhub_core::types::{ListingId, ProposalId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{ListingKind, ListingStatus};

/// An item or service that can be requested or offered in a swap.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Listing {
    /// Unique listing identifier.
    pub id: ListingId,
    /// Item or service.
    pub kind: ListingKind,
    /// The user who created the listing.
    pub owner_id: UserId,
    /// Listing title.
    pub title: String,
    /// Current status.
    pub status: ListingStatus,
    /// Bumped on every status change driven by a swap transition.
    pub version: i64,
    /// Accepted proposal that marked this listing swapped, if any.
    pub swapped_by_proposal: Option<ProposalId>,
    /// When the listing was created.
    pub created_at: DateTime<Utc>,
    /// When the listing was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Listing {
    /// Whether the given user owns this listing.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.owner_id == user_id
    }

    /// Whether the listing has already been traded away.
    pub fn is_swapped(&self) -> bool {
        self.status == ListingStatus::Swapped
    }
}
