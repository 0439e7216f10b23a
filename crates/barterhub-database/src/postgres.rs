//! PostgreSQL-backed implementation of the store seams.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};

use barterhub_core::error::{AppError, ErrorKind};
use barterhub_core::result::AppResult;
use barterhub_core::types::{
    ListingId, NotificationId, PageRequest, PageResponse, ProposalId, UserId,
};
use barterhub_entity::listing::{Listing, ListingKind};
use barterhub_entity::message::{Conversation, NewMessage, ThreadMessage};
use barterhub_entity::notification::{NewNotification, Notification};
use barterhub_entity::swap::{NewProposal, ProposalStatus, SwapProposal};
use barterhub_entity::user::UserProfile;

use crate::connection::DatabasePool;
use crate::repositories::{
    ListingRepository, MessageRepository, NotificationRepository, SwapRepository, UserRepository,
};
use crate::store::{AcceptOutcome, AcceptPlan, MessageStore, RejectOutcome, RejectPlan, SwapStore};

/// Store backed by a shared PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    db: DatabasePool,
    listings: ListingRepository,
    users: UserRepository,
    swaps: SwapRepository,
    notifications: NotificationRepository,
    messages: MessageRepository,
}

impl PgStore {
    /// Build the store and its repositories over one pool.
    pub fn new(db: DatabasePool) -> Self {
        let pool = db.pool().clone();
        Self {
            listings: ListingRepository::new(pool.clone()),
            users: UserRepository::new(pool.clone()),
            swaps: SwapRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool.clone()),
            messages: MessageRepository::new(pool),
            db,
        }
    }

    fn pool(&self) -> &PgPool {
        self.db.pool()
    }

    async fn begin(&self) -> AppResult<sqlx::Transaction<'static, sqlx::Postgres>> {
        self.pool()
            .begin()
            .await
            .map_err(crate::repositories::db_error("Failed to begin transaction"))
    }
}

async fn commit(tx: sqlx::Transaction<'static, sqlx::Postgres>) -> AppResult<()> {
    tx.commit()
        .await
        .map_err(crate::repositories::db_error("Failed to commit transaction"))
}

#[async_trait]
impl SwapStore for PgStore {
    async fn find_listing(&self, kind: ListingKind, id: ListingId) -> AppResult<Option<Listing>> {
        self.listings.find(kind, id).await
    }

    async fn find_user(&self, id: UserId) -> AppResult<Option<UserProfile>> {
        self.users.find_by_id(id).await
    }

    async fn create_proposal(
        &self,
        proposal: NewProposal,
        notification: NewNotification,
    ) -> AppResult<(SwapProposal, Notification)> {
        let mut tx = self.begin().await?;
        let created = SwapRepository::insert(&mut tx, &proposal).await?;
        let ledger = NotificationRepository::insert(&mut tx, &notification, Some(created.id)).await?;
        commit(tx).await?;
        Ok((created, ledger))
    }

    async fn find_proposal(&self, id: ProposalId) -> AppResult<Option<SwapProposal>> {
        self.swaps.find_by_id(id).await
    }

    async fn list_proposals_for_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> AppResult<PageResponse<SwapProposal>> {
        self.swaps.list_for_user(user_id, page).await
    }

    async fn find_notification(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        self.notifications.find_by_id(id).await
    }

    async fn apply_accept(&self, plan: &AcceptPlan) -> AppResult<AcceptOutcome> {
        let mut tx = self.begin().await?;

        let claimed = SwapRepository::transition_from_pending(
            &mut tx,
            plan.proposal_id,
            ProposalStatus::Accepted,
            plan.at,
        )
        .await?;
        if claimed == 0 {
            return match SwapRepository::status_of(&mut tx, plan.proposal_id).await? {
                Some(ProposalStatus::Accepted) => Ok(AcceptOutcome::AlreadyAccepted),
                Some(ProposalStatus::Rejected) => Err(AppError::conflict(format!(
                    "Swap request {} was already rejected",
                    plan.proposal_id
                ))),
                _ => Err(AppError::not_found(format!(
                    "Swap request {} not found",
                    plan.proposal_id
                ))),
            };
        }

        for &(listing_id, kind) in &plan.mark_swapped {
            let updated =
                ListingRepository::mark_swapped(&mut tx, listing_id, kind, plan.proposal_id, plan.at)
                    .await?;
            if updated != 1 {
                warn!(
                    proposal_id = %plan.proposal_id,
                    listing_id = %listing_id,
                    kind = %kind,
                    "Listing update missed during accept; rolling back"
                );
                return Err(AppError::conflict(format!(
                    "{kind} {listing_id} is missing or no longer available"
                )));
            }
        }

        let flagged = NotificationRepository::mark_accepted(&mut tx, plan.notification_id).await?;
        if flagged != 1 {
            return Err(AppError::new(
                ErrorKind::Conflict,
                format!("Notification {} could not be flagged", plan.notification_id),
            ));
        }

        commit(tx).await?;
        debug!(proposal_id = %plan.proposal_id, "Accept transaction committed");
        Ok(AcceptOutcome::Accepted)
    }

    async fn apply_reject(&self, plan: &RejectPlan) -> AppResult<RejectOutcome> {
        let mut tx = self.begin().await?;

        let claimed = SwapRepository::transition_from_pending(
            &mut tx,
            plan.proposal_id,
            ProposalStatus::Rejected,
            plan.at,
        )
        .await?;
        if claimed == 0 {
            return match SwapRepository::status_of(&mut tx, plan.proposal_id).await? {
                Some(ProposalStatus::Rejected) => Ok(RejectOutcome::AlreadyRejected),
                Some(ProposalStatus::Accepted) => Err(AppError::conflict(format!(
                    "Swap request {} was already accepted",
                    plan.proposal_id
                ))),
                _ => Err(AppError::not_found(format!(
                    "Swap request {} not found",
                    plan.proposal_id
                ))),
            };
        }

        let proposal = SwapRepository::find_in(&mut tx, plan.proposal_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Swap request {} not found", plan.proposal_id))
            })?;

        ListingRepository::restore(
            &mut tx,
            proposal.requested_id,
            proposal.requested_kind,
            proposal.id,
            proposal.requested_status_snapshot,
            plan.at,
        )
        .await?;
        if let (Some((offered_id, offered_kind)), Some(snapshot)) =
            (proposal.offer.offered_listing(), proposal.offered_status_snapshot)
        {
            ListingRepository::restore(
                &mut tx,
                offered_id,
                offered_kind,
                proposal.id,
                snapshot,
                plan.at,
            )
            .await?;
        }

        NotificationRepository::close_for_proposal(&mut tx, proposal.id).await?;

        commit(tx).await?;
        debug!(proposal_id = %plan.proposal_id, "Reject transaction committed");
        Ok(RejectOutcome::Rejected)
    }

    async fn list_open_notifications(&self, user_id: UserId) -> AppResult<Vec<Notification>> {
        self.notifications.list_open(user_id).await
    }

    async fn count_unread_notifications(&self, user_id: UserId) -> AppResult<i64> {
        self.notifications.count_unread(user_id).await
    }

    async fn mark_notification_read(&self, id: NotificationId, user_id: UserId) -> AppResult<u64> {
        self.notifications.mark_read(id, user_id).await
    }

    async fn mark_all_notifications_read(&self, user_id: UserId) -> AppResult<u64> {
        self.notifications.mark_all_read(user_id).await
    }

    async fn ping(&self) -> AppResult<()> {
        if self.db.health_check().await? {
            Ok(())
        } else {
            Err(AppError::database("Health check returned an unexpected value"))
        }
    }
}

#[async_trait]
impl MessageStore for PgStore {
    async fn insert_message(
        &self,
        message: NewMessage,
        notification: NewNotification,
    ) -> AppResult<ThreadMessage> {
        let mut tx = self.begin().await?;
        let stored = MessageRepository::insert(&mut tx, &message).await?;
        SwapRepository::touch(&mut tx, message.swap_request_id, message.created_at).await?;
        NotificationRepository::insert(&mut tx, &notification, None).await?;
        commit(tx).await?;
        Ok(stored)
    }

    async fn list_messages(&self, proposal_id: ProposalId) -> AppResult<Vec<ThreadMessage>> {
        self.messages.list_for_proposal(proposal_id).await
    }

    async fn mark_read(&self, proposal_id: ProposalId, reader: UserId) -> AppResult<u64> {
        self.messages.mark_read(proposal_id, reader).await
    }

    async fn count_unread_messages(&self, user_id: UserId) -> AppResult<i64> {
        self.messages.count_unread(user_id).await
    }

    async fn conversations(&self, user_id: UserId) -> AppResult<Vec<Conversation>> {
        self.messages.conversations(user_id).await
    }
}
