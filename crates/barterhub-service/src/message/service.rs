//! Messaging service gated by proposal participation.

use std::sync::Arc;

use tracing::info;

use barterhub_core::error::AppError;
use barterhub_core::result::AppResult;
use barterhub_core::traits::Clock;
use barterhub_core::types::ProposalId;
use barterhub_database::store::{MessageStore, SwapStore};
use barterhub_entity::message::{Conversation, NewMessage, ThreadMessage};
use barterhub_entity::notification::NewNotification;
use barterhub_entity::swap::SwapProposal;

use crate::context::RequestContext;
use crate::deadline::StoreDeadline;

/// Maximum attachments per message.
pub const MAX_ATTACHMENTS: usize = 10;

/// Chat threads keyed by swap proposal.
#[derive(Debug, Clone)]
pub struct MessagingService {
    swaps: Arc<dyn SwapStore>,
    messages: Arc<dyn MessageStore>,
    clock: Arc<dyn Clock>,
    deadline: StoreDeadline,
}

impl MessagingService {
    /// Creates a new messaging service.
    pub fn new(
        swaps: Arc<dyn SwapStore>,
        messages: Arc<dyn MessageStore>,
        clock: Arc<dyn Clock>,
        deadline: StoreDeadline,
    ) -> Self {
        Self {
            swaps,
            messages,
            clock,
            deadline,
        }
    }

    /// Messages of a proposal in chronological order.
    ///
    /// Each row carries the sender's display name. Marks the caller's unread
    /// messages in the thread as read.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        proposal_id: ProposalId,
    ) -> AppResult<Vec<ThreadMessage>> {
        self.participant_proposal(ctx, proposal_id).await?;

        let thread = self
            .deadline
            .run("list_messages", self.messages.list_messages(proposal_id))
            .await?;
        self.deadline
            .run("mark_read", self.messages.mark_read(proposal_id, ctx.user_id))
            .await?;
        Ok(thread)
    }

    /// Post a message to the other participant.
    pub async fn send(
        &self,
        ctx: &RequestContext,
        proposal_id: ProposalId,
        body: &str,
        attachments: Vec<String>,
    ) -> AppResult<ThreadMessage> {
        let body = body.trim();
        if body.is_empty() {
            return Err(AppError::validation("Message body must not be empty"));
        }
        if attachments.len() > MAX_ATTACHMENTS {
            return Err(AppError::validation(format!(
                "At most {MAX_ATTACHMENTS} attachments are allowed"
            )));
        }
        if attachments.iter().any(|a| a.trim().is_empty()) {
            return Err(AppError::validation("Attachment URLs must not be empty"));
        }

        let proposal = self.participant_proposal(ctx, proposal_id).await?;
        let receiver_id = proposal
            .counterpart_of(ctx.user_id)
            .ok_or_else(|| AppError::forbidden("Not a participant of this swap request"))?;

        let listing_title = self
            .deadline
            .run(
                "find_listing",
                self.swaps
                    .find_listing(proposal.requested_kind, proposal.requested_id),
            )
            .await?
            .map(|l| l.title)
            .unwrap_or_else(|| "your swap request".to_string());

        let now = self.clock.now();
        let message = NewMessage {
            swap_request_id: proposal_id,
            sender_id: ctx.user_id,
            receiver_id,
            body: body.to_string(),
            attachments,
            created_at: now,
        };
        let notification = NewNotification::new_message(receiver_id, &proposal, &listing_title, now);

        let stored = self
            .deadline
            .run(
                "insert_message",
                self.messages.insert_message(message, notification),
            )
            .await?;

        info!(
            message_id = %stored.message.id,
            proposal_id = %proposal_id,
            user_id = %ctx.user_id,
            "Message sent"
        );

        Ok(stored)
    }

    /// Mark the caller's unread messages in a thread as read.
    pub async fn mark_read(&self, ctx: &RequestContext, proposal_id: ProposalId) -> AppResult<u64> {
        self.participant_proposal(ctx, proposal_id).await?;
        self.deadline
            .run("mark_read", self.messages.mark_read(proposal_id, ctx.user_id))
            .await
    }

    /// Unread messages addressed to the caller.
    pub async fn unread_count(&self, ctx: &RequestContext) -> AppResult<i64> {
        self.deadline
            .run(
                "count_unread_messages",
                self.messages.count_unread_messages(ctx.user_id),
            )
            .await
    }

    /// Inbox overview for the caller.
    pub async fn conversations(&self, ctx: &RequestContext) -> AppResult<Vec<Conversation>> {
        self.deadline
            .run("conversations", self.messages.conversations(ctx.user_id))
            .await
    }

    async fn participant_proposal(
        &self,
        ctx: &RequestContext,
        proposal_id: ProposalId,
    ) -> AppResult<SwapProposal> {
        let proposal = self
            .deadline
            .run("find_proposal", self.swaps.find_proposal(proposal_id))
            .await?
            .ok_or_else(|| AppError::not_found(format!("Swap request {proposal_id} not found")))?;
        if !proposal.is_participant(ctx.user_id) {
            return Err(AppError::forbidden(
                "Only the participants can access this conversation",
            ));
        }
        Ok(proposal)
    }
}
