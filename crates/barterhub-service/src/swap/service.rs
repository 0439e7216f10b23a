//! Swap proposal manager: create, read, accept, reject.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use barterhub_core::config::SwapConfig;
use barterhub_core::error::AppError;
use barterhub_core::result::AppResult;
use barterhub_core::traits::Clock;
use barterhub_core::types::{
    ListingId, NotificationId, PageRequest, PageResponse, ProposalId, UserId,
};
use barterhub_database::store::{AcceptOutcome, AcceptPlan, RejectOutcome, RejectPlan, SwapStore};
use barterhub_entity::listing::{Listing, ListingKind};
use barterhub_entity::notification::{NewNotification, Notification};
use barterhub_entity::swap::{
    NewProposal, ProposalRole, ProposalStatus, SwapOffer, SwapProposal,
};
use barterhub_entity::user::UserProfile;

use super::input::CreateProposalInput;
use super::wording;
use crate::context::RequestContext;
use crate::deadline::StoreDeadline;
use crate::notification::NotificationDispatcher;
use crate::notification::compose;

/// Identifies the proposal a reject targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProposalRef {
    /// By proposal id.
    Proposal(ProposalId),
    /// By the id of the proposal's ledger row.
    Notification(NotificationId),
}

/// Returned by [`SwapService::create`].
#[derive(Debug, Clone, Serialize)]
pub struct CreatedProposal {
    pub proposal_id: ProposalId,
    pub notification_id: NotificationId,
    pub status: ProposalStatus,
}

/// Returned by [`SwapService::accept`].
#[derive(Debug, Clone, Serialize)]
pub struct AcceptResult {
    pub proposal_id: ProposalId,
    pub notification_id: NotificationId,
    pub outcome: AcceptOutcome,
    /// Set when the transition committed but an email could not be sent.
    pub email_warning: Option<String>,
}

/// Returned by [`SwapService::reject`].
#[derive(Debug, Clone, Serialize)]
pub struct RejectResult {
    pub proposal_id: ProposalId,
    pub outcome: RejectOutcome,
}

/// A proposal as listed for one of its participants.
#[derive(Debug, Clone, Serialize)]
pub struct ProposalSummary {
    #[serde(flatten)]
    pub proposal: SwapProposal,
    pub role: ProposalRole,
}

/// Drives proposals through `pending -> accepted | rejected`.
///
/// State changes go through the store as single units of work. Emails are
/// sent through the [`NotificationDispatcher`] only after the transition
/// committed, and their failure never undoes it.
#[derive(Debug, Clone)]
pub struct SwapService {
    store: Arc<dyn SwapStore>,
    dispatcher: NotificationDispatcher,
    clock: Arc<dyn Clock>,
    config: SwapConfig,
    deadline: StoreDeadline,
}

impl SwapService {
    /// Creates a new swap service.
    pub fn new(
        store: Arc<dyn SwapStore>,
        dispatcher: NotificationDispatcher,
        clock: Arc<dyn Clock>,
        config: SwapConfig,
        deadline: StoreDeadline,
    ) -> Self {
        Self {
            store,
            dispatcher,
            clock,
            config,
            deadline,
        }
    }

    /// Create a proposal and its ledger row, then email the listing owner.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: &CreateProposalInput,
    ) -> AppResult<CreatedProposal> {
        let valid = input.validate()?;

        let requested = self
            .listing(valid.requested_kind, valid.requested_id)
            .await?;
        if requested.is_owned_by(ctx.user_id) {
            return Err(AppError::validation(
                "You cannot request a swap for your own listing",
            ));
        }
        if requested.is_swapped() {
            return Err(AppError::conflict(format!(
                "{} {} has already been swapped",
                requested.kind, requested.id
            )));
        }

        let requester = self.user(ctx.user_id).await?;
        let requester_name = requester.display_name();

        let (message, offered_status) = match valid.offer {
            SwapOffer::Barter {
                offered_id,
                offered_kind,
            } => {
                let offered = self.listing(offered_kind, offered_id).await?;
                if !offered.is_owned_by(ctx.user_id) {
                    return Err(AppError::forbidden("You can only offer your own listings"));
                }
                if offered.is_swapped() {
                    return Err(AppError::conflict(format!(
                        "{} {} has already been swapped",
                        offered.kind, offered.id
                    )));
                }
                (
                    wording::barter_offer(&requester_name, &offered, &requested),
                    Some(offered.status),
                )
            }
            SwapOffer::Money { amount } => (
                wording::money_offer(&requester_name, &requested, amount),
                None,
            ),
        };

        let owner = self.user(requested.owner_id).await?;
        let link = self
            .config
            .listing_link(requested.kind.path_segment(), requested.id.get());
        let now = self.clock.now();

        let proposal = NewProposal {
            requester_id: ctx.user_id,
            requested_id: requested.id,
            requested_kind: requested.kind,
            requested_owner_id: requested.owner_id,
            offer: valid.offer,
            requested_status_snapshot: requested.status,
            offered_status_snapshot: offered_status,
            created_at: now,
        };
        let notification = NewNotification::swap_proposal(
            owner.id,
            message.clone(),
            requested.id,
            requested.kind,
            &valid.offer,
            link.clone(),
            now,
        );

        let (created, ledger) = self
            .deadline
            .run(
                "create_proposal",
                self.store.create_proposal(proposal, notification),
            )
            .await?;

        info!(
            proposal_id = %created.id,
            notification_id = %ledger.id,
            user_id = %ctx.user_id,
            owner_id = %owner.id,
            money_offer = created.offer.is_money_offer(),
            "Swap request created"
        );

        self.dispatcher
            .spawn_delivery(compose::proposal_received(&owner, &message, &link));

        Ok(CreatedProposal {
            proposal_id: created.id,
            notification_id: ledger.id,
            status: created.status,
        })
    }

    /// A proposal, visible to its two participants only.
    pub async fn get(&self, ctx: &RequestContext, id: ProposalId) -> AppResult<SwapProposal> {
        let proposal = self.proposal(id).await?;
        if !proposal.is_participant(ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the participants can view this swap request",
            ));
        }
        Ok(proposal)
    }

    /// Proposals the caller sent or received, newest first.
    pub async fn list_for_user(
        &self,
        ctx: &RequestContext,
        page: PageRequest,
    ) -> AppResult<PageResponse<ProposalSummary>> {
        let user_id = ctx.user_id;
        let proposals = self
            .deadline
            .run(
                "list_proposals_for_user",
                self.store.list_proposals_for_user(user_id, page),
            )
            .await?;
        Ok(proposals.map(|proposal| {
            let role = if proposal.requester_id == user_id {
                ProposalRole::Requester
            } else {
                ProposalRole::Owner
            };
            ProposalSummary { proposal, role }
        }))
    }

    /// Accept the proposal behind a notification.
    ///
    /// Only the requested listing's owner may accept. Barter offers mark both
    /// listings swapped in the same unit of work that flags the notification.
    /// A repeated accept reports `already_accepted` and has no side effects.
    pub async fn accept(
        &self,
        ctx: &RequestContext,
        notification_id: NotificationId,
    ) -> AppResult<AcceptResult> {
        let notification = self.notification(notification_id).await?;
        let proposal_id = swap_request_of(&notification)?;
        if notification.user_id != ctx.user_id {
            return Err(AppError::forbidden(
                "Only the owner of the requested listing can accept this swap",
            ));
        }

        let proposal = self.proposal(proposal_id).await?;
        match proposal.status {
            ProposalStatus::Accepted => {
                return Ok(already_accepted(proposal_id, notification_id));
            }
            ProposalStatus::Rejected => {
                return Err(AppError::conflict(format!(
                    "Swap request {proposal_id} was already rejected"
                )));
            }
            ProposalStatus::Pending => {}
        }

        let requested = self
            .find_listing(proposal.requested_kind, proposal.requested_id)
            .await?
            .ok_or_else(|| {
                AppError::conflict(format!(
                    "{} {} no longer exists",
                    proposal.requested_kind, proposal.requested_id
                ))
            })?;
        let accepter = self.user(ctx.user_id).await?;
        let requester = self.user(proposal.requester_id).await?;

        let plan = AcceptPlan {
            proposal_id,
            notification_id,
            mark_swapped: self.swap_targets(&proposal),
            at: self.clock.now(),
        };
        let outcome = self
            .deadline
            .run("apply_accept", self.store.apply_accept(&plan))
            .await?;
        if outcome == AcceptOutcome::AlreadyAccepted {
            info!(proposal_id = %proposal_id, "Swap request was accepted concurrently");
            return Ok(already_accepted(proposal_id, notification_id));
        }

        info!(
            proposal_id = %proposal_id,
            notification_id = %notification_id,
            user_id = %ctx.user_id,
            money_offer = proposal.offer.is_money_offer(),
            listings_swapped = plan.mark_swapped.len(),
            "Swap request accepted"
        );

        let (to_owner, to_requester) = tokio::join!(
            self.dispatcher.deliver(compose::accept_confirmation(
                &accepter,
                &requester,
                &requested.title
            )),
            self.dispatcher.deliver(compose::accept_notice(
                &requester,
                &accepter,
                &requested.title
            )),
        );
        let failed = [&to_owner, &to_requester]
            .iter()
            .filter(|report| !report.delivered())
            .count();
        let email_warning = (failed > 0).then(|| {
            format!("Swap accepted, but {failed} notification email(s) could not be delivered")
        });

        Ok(AcceptResult {
            proposal_id,
            notification_id,
            outcome: AcceptOutcome::Accepted,
            email_warning,
        })
    }

    /// Close a pending proposal. Either participant may reject.
    ///
    /// Listings swapped by this proposal return to their creation-time
    /// status; rows are kept for history. A repeated reject reports
    /// `already_rejected`.
    pub async fn reject(&self, ctx: &RequestContext, target: ProposalRef) -> AppResult<RejectResult> {
        let proposal_id = match target {
            ProposalRef::Proposal(id) => id,
            ProposalRef::Notification(id) => swap_request_of(&self.notification(id).await?)?,
        };

        let proposal = self.proposal(proposal_id).await?;
        let counterpart = proposal.counterpart_of(ctx.user_id).ok_or_else(|| {
            AppError::forbidden("Only the participants can reject this swap request")
        })?;

        let plan = RejectPlan {
            proposal_id,
            at: self.clock.now(),
        };
        let outcome = self
            .deadline
            .run("apply_reject", self.store.apply_reject(&plan))
            .await?;

        if outcome == RejectOutcome::Rejected {
            info!(
                proposal_id = %proposal_id,
                user_id = %ctx.user_id,
                "Swap request rejected"
            );
            self.notify_closed(&proposal, ctx.user_id, counterpart)
                .await;
        }

        Ok(RejectResult {
            proposal_id,
            outcome,
        })
    }

    /// Listings an accept marks swapped.
    fn swap_targets(&self, proposal: &SwapProposal) -> Vec<(ListingId, ListingKind)> {
        let requested = (proposal.requested_id, proposal.requested_kind);
        match proposal.offer {
            SwapOffer::Barter {
                offered_id,
                offered_kind,
            } => vec![requested, (offered_id, offered_kind)],
            SwapOffer::Money { .. } if self.config.money_offer_marks_swapped => vec![requested],
            SwapOffer::Money { .. } => Vec::new(),
        }
    }

    async fn notify_closed(&self, proposal: &SwapProposal, actor_id: UserId, recipient_id: UserId) {
        let lookups = async {
            let actor = self.user(actor_id).await?;
            let recipient = self.user(recipient_id).await?;
            let title = self
                .find_listing(proposal.requested_kind, proposal.requested_id)
                .await?
                .map(|l| l.title)
                .unwrap_or_else(|| format!("{} {}", proposal.requested_kind, proposal.requested_id));
            Ok::<_, AppError>((actor, recipient, title))
        };
        match lookups.await {
            Ok((actor, recipient, title)) => self
                .dispatcher
                .spawn_delivery(compose::proposal_closed(&recipient, &actor, &title)),
            Err(e) => warn!(
                proposal_id = %proposal.id,
                error = %e,
                "Skipping reject email"
            ),
        }
    }

    async fn find_listing(&self, kind: ListingKind, id: ListingId) -> AppResult<Option<Listing>> {
        self.deadline
            .run("find_listing", self.store.find_listing(kind, id))
            .await
    }

    async fn listing(&self, kind: ListingKind, id: ListingId) -> AppResult<Listing> {
        self.find_listing(kind, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("{kind} {id} not found")))
    }

    async fn user(&self, id: UserId) -> AppResult<UserProfile> {
        self.deadline
            .run("find_user", self.store.find_user(id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    async fn proposal(&self, id: ProposalId) -> AppResult<SwapProposal> {
        self.deadline
            .run("find_proposal", self.store.find_proposal(id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Swap request {id} not found")))
    }

    async fn notification(&self, id: NotificationId) -> AppResult<Notification> {
        self.deadline
            .run("find_notification", self.store.find_notification(id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))
    }
}

/// The proposal a swap-proposal notification belongs to.
fn swap_request_of(notification: &Notification) -> AppResult<ProposalId> {
    match notification.swap_request_id {
        Some(id) if notification.is_swap_proposal() => Ok(id),
        _ => Err(AppError::validation(format!(
            "Notification {} is not a swap request",
            notification.id
        ))),
    }
}

fn already_accepted(proposal_id: ProposalId, notification_id: NotificationId) -> AcceptResult {
    AcceptResult {
        proposal_id,
        notification_id,
        outcome: AcceptOutcome::AlreadyAccepted,
        email_warning: None,
    }
}
