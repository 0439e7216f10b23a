//! Swap proposal entity model.

use barterhub_core::AppError;
use barterhub_core::types::{ListingId, ProposalId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{Money, ProposalStatus, SwapOffer};
use crate::listing::{ListingKind, ListingStatus};

/// Raw `swap_requests` row with the offer still flattened.
#[derive(Debug, Clone, FromRow)]
pub struct SwapProposalRow {
    pub id: ProposalId,
    pub requester_id: UserId,
    pub requested_id: ListingId,
    pub requested_kind: ListingKind,
    pub requested_owner_id: UserId,
    pub is_money_offer: bool,
    pub offered_id: Option<ListingId>,
    pub offered_kind: Option<ListingKind>,
    pub money_amount_cents: Option<Money>,
    pub status: ProposalStatus,
    pub requested_status_snapshot: ListingStatus,
    pub offered_status_snapshot: Option<ListingStatus>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// A request to trade an offer (listing or money) for another user's listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapProposal {
    /// Unique proposal identifier.
    pub id: ProposalId,
    /// The user who made the proposal.
    pub requester_id: UserId,
    /// The listing being asked for.
    pub requested_id: ListingId,
    /// Kind of the requested listing.
    pub requested_kind: ListingKind,
    /// Owner of the requested listing when the proposal was made.
    pub requested_owner_id: UserId,
    /// What the requester gives in return.
    pub offer: SwapOffer,
    /// Lifecycle state.
    pub status: ProposalStatus,
    /// Status of the requested listing when the proposal was made.
    pub requested_status_snapshot: ListingStatus,
    /// Status of the offered listing when the proposal was made.
    pub offered_status_snapshot: Option<ListingStatus>,
    /// When the proposal was created.
    pub created_at: DateTime<Utc>,
    /// Touched by every new message in the proposal's thread.
    pub updated_at: DateTime<Utc>,
    /// When the proposal was rejected.
    pub closed_at: Option<DateTime<Utc>>,
}

impl TryFrom<SwapProposalRow> for SwapProposal {
    type Error = AppError;

    fn try_from(row: SwapProposalRow) -> Result<Self, Self::Error> {
        let offer = SwapOffer::from_columns(
            row.is_money_offer,
            row.offered_id,
            row.offered_kind,
            row.money_amount_cents,
        )?;
        Ok(Self {
            id: row.id,
            requester_id: row.requester_id,
            requested_id: row.requested_id,
            requested_kind: row.requested_kind,
            requested_owner_id: row.requested_owner_id,
            offer,
            status: row.status,
            requested_status_snapshot: row.requested_status_snapshot,
            offered_status_snapshot: row.offered_status_snapshot,
            created_at: row.created_at,
            updated_at: row.updated_at,
            closed_at: row.closed_at,
        })
    }
}

/// The caller's side of a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalRole {
    /// The caller made the proposal.
    Requester,
    /// The caller owns the requested listing.
    Owner,
}

impl SwapProposal {
    /// Whether the user is the requester or the requested listing's owner.
    pub fn is_participant(&self, user_id: UserId) -> bool {
        user_id == self.requester_id || user_id == self.requested_owner_id
    }

    /// The caller's role, or `None` for outsiders.
    pub fn role_of(&self, user_id: UserId) -> Option<ProposalRole> {
        if user_id == self.requester_id {
            Some(ProposalRole::Requester)
        } else if user_id == self.requested_owner_id {
            Some(ProposalRole::Owner)
        } else {
            None
        }
    }

    /// The participant on the other side from `user_id`.
    pub fn counterpart_of(&self, user_id: UserId) -> Option<UserId> {
        match self.role_of(user_id)? {
            ProposalRole::Requester => Some(self.requested_owner_id),
            ProposalRole::Owner => Some(self.requester_id),
        }
    }
}

/// Data required to insert a new proposal.
#[derive(Debug, Clone)]
pub struct NewProposal {
    pub requester_id: UserId,
    pub requested_id: ListingId,
    pub requested_kind: ListingKind,
    pub requested_owner_id: UserId,
    pub offer: SwapOffer,
    pub requested_status_snapshot: ListingStatus,
    pub offered_status_snapshot: Option<ListingStatus>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal() -> SwapProposal {
        let now = Utc::now();
        SwapProposal {
            id: ProposalId::new(1),
            requester_id: UserId::new(2),
            requested_id: ListingId::new(10),
            requested_kind: ListingKind::Item,
            requested_owner_id: UserId::new(1),
            offer: SwapOffer::Barter {
                offered_id: ListingId::new(20),
                offered_kind: ListingKind::Item,
            },
            status: ProposalStatus::Pending,
            requested_status_snapshot: ListingStatus::Published,
            offered_status_snapshot: Some(ListingStatus::Published),
            created_at: now,
            updated_at: now,
            closed_at: None,
        }
    }

    #[test]
    fn test_roles_and_counterparts() {
        let p = proposal();
        assert_eq!(p.role_of(UserId::new(2)), Some(ProposalRole::Requester));
        assert_eq!(p.role_of(UserId::new(1)), Some(ProposalRole::Owner));
        assert_eq!(p.role_of(UserId::new(3)), None);
        assert_eq!(p.counterpart_of(UserId::new(2)), Some(UserId::new(1)));
        assert_eq!(p.counterpart_of(UserId::new(1)), Some(UserId::new(2)));
        assert!(!p.is_participant(UserId::new(3)));
    }
}
