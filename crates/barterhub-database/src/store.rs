//! Store seams consumed by the swap and messaging services.
//!
//! Every method that writes more than one row is a single unit of work:
//! implementations either apply all of it or none of it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use barterhub_core::result::AppResult;
use barterhub_core::types::{
    ListingId, NotificationId, PageRequest, PageResponse, ProposalId, UserId,
};
use barterhub_entity::listing::{Listing, ListingKind};
use barterhub_entity::message::{Conversation, NewMessage, ThreadMessage};
use barterhub_entity::notification::{NewNotification, Notification};
use barterhub_entity::swap::{NewProposal, SwapProposal};
use barterhub_entity::user::UserProfile;

/// Everything the accept transaction writes.
#[derive(Debug, Clone)]
pub struct AcceptPlan {
    /// Proposal moving `pending -> accepted`.
    pub proposal_id: ProposalId,
    /// Its ledger row, flagged `accepted`.
    pub notification_id: NotificationId,
    /// Listings to mark `swapped`; each must exist with the given kind and
    /// not already be swapped.
    pub mark_swapped: Vec<(ListingId, ListingKind)>,
    /// Transition timestamp.
    pub at: DateTime<Utc>,
}

/// Everything the reject transaction writes.
#[derive(Debug, Clone)]
pub struct RejectPlan {
    /// Proposal moving `pending -> rejected`.
    pub proposal_id: ProposalId,
    /// Transition timestamp.
    pub at: DateTime<Utc>,
}

/// Result of an accept attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptOutcome {
    /// This call performed the transition.
    Accepted,
    /// An earlier call already did; nothing was written.
    AlreadyAccepted,
}

/// Result of a reject attempt that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectOutcome {
    /// This call performed the transition.
    Rejected,
    /// An earlier call already did; nothing was written.
    AlreadyRejected,
}

/// Persistence for listings, users, proposals and the notification ledger.
#[async_trait]
pub trait SwapStore: Send + Sync + std::fmt::Debug + 'static {
    /// Fetch a listing by kind and id.
    async fn find_listing(&self, kind: ListingKind, id: ListingId) -> AppResult<Option<Listing>>;

    /// Fetch a user's contact profile.
    async fn find_user(&self, id: UserId) -> AppResult<Option<UserProfile>>;

    /// Insert a proposal and its ledger row together.
    ///
    /// The notification's `swap_request_id` is set to the new proposal's id.
    async fn create_proposal(
        &self,
        proposal: NewProposal,
        notification: NewNotification,
    ) -> AppResult<(SwapProposal, Notification)>;

    /// Fetch a proposal by id.
    async fn find_proposal(&self, id: ProposalId) -> AppResult<Option<SwapProposal>>;

    /// Proposals the user sent or received, newest first.
    async fn list_proposals_for_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> AppResult<PageResponse<SwapProposal>>;

    /// Fetch a notification by id.
    async fn find_notification(&self, id: NotificationId) -> AppResult<Option<Notification>>;

    /// Apply `pending -> accepted` with a compare-and-set on the proposal
    /// status. Fails with `Conflict` and writes nothing if any listing update
    /// misses or the proposal was rejected.
    async fn apply_accept(&self, plan: &AcceptPlan) -> AppResult<AcceptOutcome>;

    /// Apply `pending -> rejected`, restore listings this proposal swapped,
    /// and close the ledger row. Fails with `Conflict` if already accepted.
    async fn apply_reject(&self, plan: &RejectPlan) -> AppResult<RejectOutcome>;

    /// Swap-proposal notifications that are neither accepted nor closed.
    async fn list_open_notifications(&self, user_id: UserId) -> AppResult<Vec<Notification>>;

    /// Unread notifications of any kind.
    async fn count_unread_notifications(&self, user_id: UserId) -> AppResult<i64>;

    /// Mark one of the user's notifications read. Returns affected rows.
    async fn mark_notification_read(&self, id: NotificationId, user_id: UserId) -> AppResult<u64>;

    /// Mark every unread notification of the user read.
    async fn mark_all_notifications_read(&self, user_id: UserId) -> AppResult<u64>;

    /// Connectivity check for `/health`.
    async fn ping(&self) -> AppResult<()>;
}

/// Persistence for swap chat threads.
#[async_trait]
pub trait MessageStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a message, touch the proposal's `updated_at`, and record the
    /// receiver's new-message notification.
    async fn insert_message(
        &self,
        message: NewMessage,
        notification: NewNotification,
    ) -> AppResult<ThreadMessage>;

    /// Messages of a proposal ordered by `(created_at, id)` ascending, each
    /// with its sender's display name.
    async fn list_messages(&self, proposal_id: ProposalId) -> AppResult<Vec<ThreadMessage>>;

    /// Mark every unread message addressed to `reader` in the thread as read.
    async fn mark_read(&self, proposal_id: ProposalId, reader: UserId) -> AppResult<u64>;

    /// Unread messages addressed to the user across all threads.
    async fn count_unread_messages(&self, user_id: UserId) -> AppResult<i64>;

    /// One overview row per proposal the user participates in.
    async fn conversations(&self, user_id: UserId) -> AppResult<Vec<Conversation>>;
}
