//! Notification entity model.

use barterhub_core::types::{ListingId, NotificationId, ProposalId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::NotificationKind;
use crate::listing::ListingKind;
use crate::swap::{Money, SwapOffer, SwapProposal};

/// A durable notification addressed to a single user.
///
/// Swap-proposal rows carry the proposal's offer columns; new-message rows
/// leave them empty and never take part in accept or reject.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient user.
    pub user_id: UserId,
    /// Notification category.
    pub kind: NotificationKind,
    /// Short title.
    pub title: String,
    /// Notification body text.
    pub message: String,
    /// The proposal this notification belongs to.
    pub swap_request_id: Option<ProposalId>,
    /// Requested listing.
    pub requested_id: Option<ListingId>,
    /// Requested listing kind.
    pub requested_kind: Option<ListingKind>,
    /// Offered listing, for barter offers.
    pub offered_id: Option<ListingId>,
    /// Offered listing kind, for barter offers.
    pub offered_kind: Option<ListingKind>,
    /// Whether the offer is cash.
    pub is_money_offer: bool,
    /// Offered amount, for money offers.
    pub money_amount_cents: Option<Money>,
    /// Deep link to the requested listing.
    pub product_link: Option<String>,
    /// Flipped once when the proposal is accepted.
    pub accepted: bool,
    /// Set when the proposal is rejected.
    pub closed: bool,
    /// Whether the recipient has seen it.
    pub is_read: bool,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Whether this row represents an incoming swap proposal.
    pub fn is_swap_proposal(&self) -> bool {
        self.kind == NotificationKind::SwapProposal
    }

    /// Still awaiting a decision.
    pub fn is_open(&self) -> bool {
        self.is_swap_proposal() && !self.accepted && !self.closed
    }
}

/// Data required to insert a new notification.
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub user_id: UserId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub swap_request_id: Option<ProposalId>,
    pub requested_id: Option<ListingId>,
    pub requested_kind: Option<ListingKind>,
    pub offered_id: Option<ListingId>,
    pub offered_kind: Option<ListingKind>,
    pub is_money_offer: bool,
    pub money_amount_cents: Option<Money>,
    pub product_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewNotification {
    /// The ledger row announcing a proposal to the requested listing's owner.
    ///
    /// `swap_request_id` is filled in by the store once the proposal row exists.
    pub fn swap_proposal(
        recipient: UserId,
        message: String,
        requested_id: ListingId,
        requested_kind: ListingKind,
        offer: &SwapOffer,
        product_link: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        let (is_money_offer, offered_id, offered_kind, money_amount_cents) = offer.columns();
        Self {
            user_id: recipient,
            kind: NotificationKind::SwapProposal,
            title: "New Swap Request".to_string(),
            message,
            swap_request_id: None,
            requested_id: Some(requested_id),
            requested_kind: Some(requested_kind),
            offered_id,
            offered_kind,
            is_money_offer,
            money_amount_cents,
            product_link: Some(product_link),
            created_at,
        }
    }

    /// The ledger row announcing a chat message.
    pub fn new_message(
        recipient: UserId,
        proposal: &SwapProposal,
        listing_title: &str,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: recipient,
            kind: NotificationKind::NewMessage,
            title: "New Message".to_string(),
            message: format!("You have received a new message regarding {listing_title}"),
            swap_request_id: Some(proposal.id),
            requested_id: None,
            requested_kind: None,
            offered_id: None,
            offered_kind: None,
            is_money_offer: false,
            money_amount_cents: None,
            product_link: None,
            created_at,
        }
    }
}
