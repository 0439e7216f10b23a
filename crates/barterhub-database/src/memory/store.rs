//! In-memory implementation of [`SwapStore`] and [`MessageStore`].
//!
//! A single `tokio::sync::Mutex` guards all tables, so every trait method
//! is trivially atomic. Multi-row transitions validate every precondition
//! before touching any row, matching the all-or-nothing behaviour of the
//! PostgreSQL transactions.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use barterhub_core::error::AppError;
use barterhub_core::result::AppResult;
use barterhub_core::types::{
    ListingId, MessageId, NotificationId, PageRequest, PageResponse, ProposalId, UserId,
};
use barterhub_entity::listing::{Listing, ListingKind, ListingStatus};
use barterhub_entity::message::{Conversation, Message, NewMessage, ThreadMessage};
use barterhub_entity::notification::{NewNotification, Notification, NotificationKind};
use barterhub_entity::swap::{NewProposal, ProposalStatus, SwapProposal};
use barterhub_entity::user::UserProfile;

use crate::store::{AcceptOutcome, AcceptPlan, MessageStore, RejectOutcome, RejectPlan, SwapStore};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<UserId, UserProfile>,
    listings: BTreeMap<ListingId, Listing>,
    proposals: BTreeMap<ProposalId, SwapProposal>,
    notifications: BTreeMap<NotificationId, Notification>,
    messages: BTreeMap<MessageId, Message>,
    next_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn proposal_notification(&self, proposal_id: ProposalId) -> Option<&Notification> {
        self.notifications
            .values()
            .find(|n| n.is_swap_proposal() && n.swap_request_id == Some(proposal_id))
    }

    fn insert_notification(
        &mut self,
        new: NewNotification,
        swap_request_id: Option<ProposalId>,
    ) -> AppResult<Notification> {
        let swap_request_id = swap_request_id.or(new.swap_request_id);
        if new.kind == NotificationKind::SwapProposal {
            if let Some(proposal_id) = swap_request_id {
                if self.proposal_notification(proposal_id).is_some() {
                    return Err(AppError::conflict(format!(
                        "Swap request {proposal_id} already has a notification"
                    )));
                }
            }
        }
        let id = NotificationId::new(self.next_id());
        let row = Notification {
            id,
            user_id: new.user_id,
            kind: new.kind,
            title: new.title,
            message: new.message,
            swap_request_id,
            requested_id: new.requested_id,
            requested_kind: new.requested_kind,
            offered_id: new.offered_id,
            offered_kind: new.offered_kind,
            is_money_offer: new.is_money_offer,
            money_amount_cents: new.money_amount_cents,
            product_link: new.product_link,
            accepted: false,
            closed: false,
            is_read: false,
            created_at: new.created_at,
        };
        self.notifications.insert(id, row.clone());
        Ok(row)
    }

    fn with_sender(&self, message: Message) -> ThreadMessage {
        let sender_name = self
            .users
            .get(&message.sender_id)
            .map(UserProfile::display_name)
            .unwrap_or_default();
        ThreadMessage {
            message,
            sender_name,
        }
    }

    fn listing_matches(&self, id: ListingId, kind: ListingKind) -> Option<&Listing> {
        self.listings.get(&id).filter(|l| l.kind == kind)
    }
}

/// Process-local store; contents vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user row.
    pub async fn insert_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone: Option<&str>,
        location: Option<&str>,
    ) -> UserProfile {
        let mut tables = self.tables.lock().await;
        let id = UserId::new(tables.next_id());
        let user = UserProfile {
            id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            location: location.map(str::to_string),
            created_at: Utc::now(),
        };
        tables.users.insert(id, user.clone());
        user
    }

    /// Seed a listing row.
    pub async fn insert_listing(
        &self,
        kind: ListingKind,
        owner_id: UserId,
        title: &str,
        status: ListingStatus,
    ) -> Listing {
        let mut tables = self.tables.lock().await;
        let id = ListingId::new(tables.next_id());
        let now = Utc::now();
        let listing = Listing {
            id,
            kind,
            owner_id,
            title: title.to_string(),
            status,
            version: 0,
            swapped_by_proposal: None,
            created_at: now,
            updated_at: now,
        };
        tables.listings.insert(id, listing.clone());
        listing
    }

    /// Current state of a listing, regardless of kind.
    pub async fn listing(&self, id: ListingId) -> Option<Listing> {
        self.tables.lock().await.listings.get(&id).cloned()
    }

    /// Overwrite a listing's status, as the owner's edit path would.
    pub async fn set_listing_status(&self, id: ListingId, status: ListingStatus) -> bool {
        let mut tables = self.tables.lock().await;
        match tables.listings.get_mut(&id) {
            Some(listing) => {
                listing.status = status;
                listing.version += 1;
                listing.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Number of proposal rows, for asserting that failed writes left nothing behind.
    pub async fn proposal_count(&self) -> usize {
        self.tables.lock().await.proposals.len()
    }

    /// Number of notification rows of any kind.
    pub async fn notification_count(&self) -> usize {
        self.tables.lock().await.notifications.len()
    }
}

#[async_trait]
impl SwapStore for MemoryStore {
    async fn find_listing(&self, kind: ListingKind, id: ListingId) -> AppResult<Option<Listing>> {
        let tables = self.tables.lock().await;
        Ok(tables.listing_matches(id, kind).cloned())
    }

    async fn find_user(&self, id: UserId) -> AppResult<Option<UserProfile>> {
        Ok(self.tables.lock().await.users.get(&id).cloned())
    }

    async fn create_proposal(
        &self,
        proposal: NewProposal,
        notification: NewNotification,
    ) -> AppResult<(SwapProposal, Notification)> {
        let mut tables = self.tables.lock().await;
        if tables
            .listing_matches(proposal.requested_id, proposal.requested_kind)
            .is_none()
        {
            return Err(AppError::conflict(format!(
                "{} {} no longer exists",
                proposal.requested_kind, proposal.requested_id
            )));
        }

        let id = ProposalId::new(tables.next_id());
        let created = SwapProposal {
            id,
            requester_id: proposal.requester_id,
            requested_id: proposal.requested_id,
            requested_kind: proposal.requested_kind,
            requested_owner_id: proposal.requested_owner_id,
            offer: proposal.offer,
            status: ProposalStatus::Pending,
            requested_status_snapshot: proposal.requested_status_snapshot,
            offered_status_snapshot: proposal.offered_status_snapshot,
            created_at: proposal.created_at,
            updated_at: proposal.created_at,
            closed_at: None,
        };
        tables.proposals.insert(id, created.clone());
        match tables.insert_notification(notification, Some(id)) {
            Ok(ledger) => Ok((created, ledger)),
            Err(err) => {
                tables.proposals.remove(&id);
                Err(err)
            }
        }
    }

    async fn find_proposal(&self, id: ProposalId) -> AppResult<Option<SwapProposal>> {
        Ok(self.tables.lock().await.proposals.get(&id).cloned())
    }

    async fn list_proposals_for_user(
        &self,
        user_id: UserId,
        page: PageRequest,
    ) -> AppResult<PageResponse<SwapProposal>> {
        let tables = self.tables.lock().await;
        let mut mine: Vec<SwapProposal> = tables
            .proposals
            .values()
            .filter(|p| p.is_participant(user_id))
            .cloned()
            .collect();
        mine.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        let total = mine.len() as u64;
        let items = mine
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();
        Ok(PageResponse::new(items, page, total))
    }

    async fn find_notification(&self, id: NotificationId) -> AppResult<Option<Notification>> {
        Ok(self.tables.lock().await.notifications.get(&id).cloned())
    }

    async fn apply_accept(&self, plan: &AcceptPlan) -> AppResult<AcceptOutcome> {
        let mut tables = self.tables.lock().await;

        let status = tables
            .proposals
            .get(&plan.proposal_id)
            .map(|p| p.status)
            .ok_or_else(|| {
                AppError::not_found(format!("Swap request {} not found", plan.proposal_id))
            })?;
        match status {
            ProposalStatus::Accepted => return Ok(AcceptOutcome::AlreadyAccepted),
            ProposalStatus::Rejected => {
                return Err(AppError::conflict(format!(
                    "Swap request {} was already rejected",
                    plan.proposal_id
                )));
            }
            ProposalStatus::Pending => {}
        }

        for &(listing_id, kind) in &plan.mark_swapped {
            let available = tables
                .listing_matches(listing_id, kind)
                .is_some_and(|l| !l.is_swapped());
            if !available {
                return Err(AppError::conflict(format!(
                    "{kind} {listing_id} is missing or no longer available"
                )));
            }
        }
        let flaggable = tables
            .notifications
            .get(&plan.notification_id)
            .is_some_and(Notification::is_swap_proposal);
        if !flaggable {
            return Err(AppError::conflict(format!(
                "Notification {} could not be flagged",
                plan.notification_id
            )));
        }

        for &(listing_id, _) in &plan.mark_swapped {
            if let Some(listing) = tables.listings.get_mut(&listing_id) {
                listing.status = ListingStatus::Swapped;
                listing.version += 1;
                listing.swapped_by_proposal = Some(plan.proposal_id);
                listing.updated_at = plan.at;
            }
        }
        if let Some(notification) = tables.notifications.get_mut(&plan.notification_id) {
            notification.accepted = true;
        }
        if let Some(proposal) = tables.proposals.get_mut(&plan.proposal_id) {
            proposal.status = ProposalStatus::Accepted;
            proposal.updated_at = plan.at;
        }
        Ok(AcceptOutcome::Accepted)
    }

    async fn apply_reject(&self, plan: &RejectPlan) -> AppResult<RejectOutcome> {
        let mut tables = self.tables.lock().await;

        let proposal = tables
            .proposals
            .get(&plan.proposal_id)
            .cloned()
            .ok_or_else(|| {
                AppError::not_found(format!("Swap request {} not found", plan.proposal_id))
            })?;
        match proposal.status {
            ProposalStatus::Rejected => return Ok(RejectOutcome::AlreadyRejected),
            ProposalStatus::Accepted => {
                return Err(AppError::conflict(format!(
                    "Swap request {} was already accepted",
                    plan.proposal_id
                )));
            }
            ProposalStatus::Pending => {}
        }

        let mut restores = vec![(proposal.requested_id, proposal.requested_status_snapshot)];
        if let (Some((offered_id, _)), Some(snapshot)) = (
            proposal.offer.offered_listing(),
            proposal.offered_status_snapshot,
        ) {
            restores.push((offered_id, snapshot));
        }
        for (listing_id, snapshot) in restores {
            if let Some(listing) = tables.listings.get_mut(&listing_id) {
                if listing.swapped_by_proposal == Some(proposal.id) {
                    listing.status = snapshot;
                    listing.swapped_by_proposal = None;
                    listing.version += 1;
                    listing.updated_at = plan.at;
                }
            }
        }

        for notification in tables.notifications.values_mut() {
            if notification.is_swap_proposal() && notification.swap_request_id == Some(proposal.id)
            {
                notification.closed = true;
            }
        }
        if let Some(row) = tables.proposals.get_mut(&proposal.id) {
            row.status = ProposalStatus::Rejected;
            row.closed_at = Some(plan.at);
            row.updated_at = plan.at;
        }
        Ok(RejectOutcome::Rejected)
    }

    async fn list_open_notifications(&self, user_id: UserId) -> AppResult<Vec<Notification>> {
        let tables = self.tables.lock().await;
        let mut open: Vec<Notification> = tables
            .notifications
            .values()
            .filter(|n| n.user_id == user_id && n.is_open())
            .cloned()
            .collect();
        open.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(open)
    }

    async fn count_unread_notifications(&self, user_id: UserId) -> AppResult<i64> {
        let tables = self.tables.lock().await;
        Ok(tables
            .notifications
            .values()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count() as i64)
    }

    async fn mark_notification_read(&self, id: NotificationId, user_id: UserId) -> AppResult<u64> {
        let mut tables = self.tables.lock().await;
        match tables.notifications.get_mut(&id) {
            Some(n) if n.user_id == user_id && !n.is_read => {
                n.is_read = true;
                Ok(1)
            }
            _ => Ok(0),
        }
    }

    async fn mark_all_notifications_read(&self, user_id: UserId) -> AppResult<u64> {
        let mut tables = self.tables.lock().await;
        let mut flipped = 0;
        for n in tables.notifications.values_mut() {
            if n.user_id == user_id && !n.is_read {
                n.is_read = true;
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn insert_message(
        &self,
        message: NewMessage,
        notification: NewNotification,
    ) -> AppResult<ThreadMessage> {
        let mut tables = self.tables.lock().await;
        if !tables.proposals.contains_key(&message.swap_request_id) {
            return Err(AppError::not_found(format!(
                "Swap request {} not found",
                message.swap_request_id
            )));
        }

        let id = MessageId::new(tables.next_id());
        let stored = Message {
            id,
            swap_request_id: message.swap_request_id,
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            body: message.body,
            attachments: message.attachments,
            is_read: false,
            created_at: message.created_at,
        };
        tables.messages.insert(id, stored.clone());
        if let Some(proposal) = tables.proposals.get_mut(&message.swap_request_id) {
            proposal.updated_at = message.created_at;
        }
        tables.insert_notification(notification, None)?;
        Ok(tables.with_sender(stored))
    }

    async fn list_messages(&self, proposal_id: ProposalId) -> AppResult<Vec<ThreadMessage>> {
        let tables = self.tables.lock().await;
        let mut thread: Vec<Message> = tables
            .messages
            .values()
            .filter(|m| m.swap_request_id == proposal_id)
            .cloned()
            .collect();
        thread.sort_by_key(|m| (m.created_at, m.id));
        Ok(thread.into_iter().map(|m| tables.with_sender(m)).collect())
    }

    async fn mark_read(&self, proposal_id: ProposalId, reader: UserId) -> AppResult<u64> {
        let mut tables = self.tables.lock().await;
        let mut flipped = 0;
        for message in tables.messages.values_mut() {
            if message.swap_request_id == proposal_id && message.receiver_id == reader && !message.is_read {
                message.is_read = true;
                flipped += 1;
            }
        }
        Ok(flipped)
    }

    async fn count_unread_messages(&self, user_id: UserId) -> AppResult<i64> {
        let tables = self.tables.lock().await;
        Ok(tables
            .messages
            .values()
            .filter(|m| m.receiver_id == user_id && !m.is_read)
            .count() as i64)
    }

    async fn conversations(&self, user_id: UserId) -> AppResult<Vec<Conversation>> {
        let tables = self.tables.lock().await;
        let mut rows = Vec::new();
        for proposal in tables.proposals.values() {
            let Some(other_id) = proposal.counterpart_of(user_id) else {
                continue;
            };
            let other_user_name = tables
                .users
                .get(&other_id)
                .map(UserProfile::display_name)
                .unwrap_or_default();
            let listing_title = tables
                .listings
                .get(&proposal.requested_id)
                .map(|l| l.title.clone())
                .unwrap_or_default();
            let thread = tables
                .messages
                .values()
                .filter(|m| m.swap_request_id == proposal.id);
            let last = thread.clone().max_by_key(|m| (m.created_at, m.id));
            let unread_count = thread
                .filter(|m| m.receiver_id == user_id && !m.is_read)
                .count() as i64;
            rows.push(Conversation {
                swap_request_id: proposal.id,
                other_user_id: other_id,
                other_user_name,
                listing_title,
                last_message: last.map(|m| m.body.clone()),
                last_message_at: last.map(|m| m.created_at),
                unread_count,
                updated_at: proposal.updated_at,
            });
        }
        rows.sort_by(|a, b| conversation_order(b).cmp(&conversation_order(a)));
        Ok(rows)
    }
}

/// Sort key: threads with messages first by latest message, then by activity.
fn conversation_order(row: &Conversation) -> (bool, Option<DateTime<Utc>>, DateTime<Utc>) {
    (
        row.last_message_at.is_some(),
        row.last_message_at,
        row.updated_at,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use barterhub_entity::swap::{Money, SwapOffer};

    struct Fixture {
        store: MemoryStore,
        owner: UserProfile,
        requester: UserProfile,
        requested: Listing,
        offered: Listing,
    }

    async fn fixture() -> Fixture {
        let store = MemoryStore::new();
        let owner = store
            .insert_user("Ada", "Owner", "ada@example.com", None, None)
            .await;
        let requester = store
            .insert_user("Ben", "Requester", "ben@example.com", None, None)
            .await;
        let requested = store
            .insert_listing(ListingKind::Item, owner.id, "Bike", ListingStatus::Published)
            .await;
        let offered = store
            .insert_listing(ListingKind::Item, requester.id, "Guitar", ListingStatus::Published)
            .await;
        Fixture {
            store,
            owner,
            requester,
            requested,
            offered,
        }
    }

    async fn propose(fx: &Fixture, offer: SwapOffer) -> (SwapProposal, Notification) {
        let now = Utc::now();
        let proposal = NewProposal {
            requester_id: fx.requester.id,
            requested_id: fx.requested.id,
            requested_kind: ListingKind::Item,
            requested_owner_id: fx.owner.id,
            offer,
            requested_status_snapshot: ListingStatus::Published,
            offered_status_snapshot: offer.offered_listing().map(|_| ListingStatus::Published),
            created_at: now,
        };
        let notification = NewNotification::swap_proposal(
            fx.owner.id,
            "Ben wants your bike".to_string(),
            fx.requested.id,
            ListingKind::Item,
            &offer,
            "http://localhost/items/1".to_string(),
            now,
        );
        fx.store
            .create_proposal(proposal, notification)
            .await
            .unwrap()
    }

    fn barter(fx: &Fixture) -> SwapOffer {
        SwapOffer::Barter {
            offered_id: fx.offered.id,
            offered_kind: ListingKind::Item,
        }
    }

    #[tokio::test]
    async fn test_create_links_notification_to_proposal() {
        let fx = fixture().await;
        let (proposal, notification) = propose(&fx, barter(&fx)).await;
        assert_eq!(notification.swap_request_id, Some(proposal.id));
        assert_eq!(notification.user_id, fx.owner.id);
        assert_eq!(fx.store.proposal_count().await, 1);
        assert_eq!(fx.store.notification_count().await, 1);
    }

    #[tokio::test]
    async fn test_accept_is_all_or_nothing() {
        let fx = fixture().await;
        let (proposal, notification) = propose(&fx, barter(&fx)).await;
        fx.store
            .set_listing_status(fx.offered.id, ListingStatus::Swapped)
            .await;

        let plan = AcceptPlan {
            proposal_id: proposal.id,
            notification_id: notification.id,
            mark_swapped: vec![
                (fx.requested.id, ListingKind::Item),
                (fx.offered.id, ListingKind::Item),
            ],
            at: Utc::now(),
        };
        let err = fx.store.apply_accept(&plan).await.unwrap_err();
        assert_eq!(err.kind, barterhub_core::ErrorKind::Conflict);

        let requested = fx.store.listing(fx.requested.id).await.unwrap();
        assert_eq!(requested.status, ListingStatus::Published);
        let stored = fx.store.find_notification(notification.id).await.unwrap().unwrap();
        assert!(!stored.accepted);
        let proposal = fx.store.find_proposal(proposal.id).await.unwrap().unwrap();
        assert_eq!(proposal.status, ProposalStatus::Pending);
    }

    #[tokio::test]
    async fn test_accept_with_wrong_kind_conflicts() {
        let fx = fixture().await;
        let (proposal, notification) = propose(&fx, barter(&fx)).await;
        let plan = AcceptPlan {
            proposal_id: proposal.id,
            notification_id: notification.id,
            mark_swapped: vec![
                (fx.requested.id, ListingKind::Item),
                (fx.offered.id, ListingKind::Service),
            ],
            at: Utc::now(),
        };
        assert!(fx.store.apply_accept(&plan).await.is_err());
        assert_eq!(
            fx.store.listing(fx.requested.id).await.unwrap().status,
            ListingStatus::Published
        );
    }

    #[tokio::test]
    async fn test_second_accept_reports_already_accepted() {
        let fx = fixture().await;
        let (proposal, notification) = propose(&fx, barter(&fx)).await;
        let plan = AcceptPlan {
            proposal_id: proposal.id,
            notification_id: notification.id,
            mark_swapped: vec![
                (fx.requested.id, ListingKind::Item),
                (fx.offered.id, ListingKind::Item),
            ],
            at: Utc::now(),
        };
        assert_eq!(
            fx.store.apply_accept(&plan).await.unwrap(),
            AcceptOutcome::Accepted
        );
        let version = fx.store.listing(fx.requested.id).await.unwrap().version;
        assert_eq!(
            fx.store.apply_accept(&plan).await.unwrap(),
            AcceptOutcome::AlreadyAccepted
        );
        assert_eq!(
            fx.store.listing(fx.requested.id).await.unwrap().version,
            version
        );
    }

    #[tokio::test]
    async fn test_reject_closes_and_blocks_accept() {
        let fx = fixture().await;
        let offer = SwapOffer::Money {
            amount: Money::from_cents(5000).unwrap(),
        };
        let (proposal, notification) = propose(&fx, offer).await;
        let plan = RejectPlan {
            proposal_id: proposal.id,
            at: Utc::now(),
        };
        assert_eq!(
            fx.store.apply_reject(&plan).await.unwrap(),
            RejectOutcome::Rejected
        );
        assert_eq!(
            fx.store.apply_reject(&plan).await.unwrap(),
            RejectOutcome::AlreadyRejected
        );

        let stored = fx.store.find_notification(notification.id).await.unwrap().unwrap();
        assert!(stored.closed);
        assert!(fx.store.list_open_notifications(fx.owner.id).await.unwrap().is_empty());

        let accept = AcceptPlan {
            proposal_id: proposal.id,
            notification_id: notification.id,
            mark_swapped: Vec::new(),
            at: Utc::now(),
        };
        let err = fx.store.apply_accept(&accept).await.unwrap_err();
        assert_eq!(err.kind, barterhub_core::ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_messages_order_ties_by_id() {
        let fx = fixture().await;
        let (proposal, _) = propose(&fx, barter(&fx)).await;
        let at = Utc::now();
        for body in ["first", "second", "third"] {
            let message = NewMessage {
                swap_request_id: proposal.id,
                sender_id: fx.requester.id,
                receiver_id: fx.owner.id,
                body: body.to_string(),
                attachments: Vec::new(),
                created_at: at,
            };
            let notification = NewNotification::new_message(fx.owner.id, &proposal, "Bike", at);
            let stored = fx.store.insert_message(message, notification).await.unwrap();
            assert_eq!(stored.sender_name, "Ben Requester");
        }

        let bodies: Vec<String> = fx
            .store
            .list_messages(proposal.id)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.message.body)
            .collect();
        assert_eq!(bodies, ["first", "second", "third"]);

        assert_eq!(fx.store.count_unread_messages(fx.owner.id).await.unwrap(), 3);
        assert_eq!(fx.store.mark_read(proposal.id, fx.requester.id).await.unwrap(), 0);
        assert_eq!(fx.store.mark_read(proposal.id, fx.owner.id).await.unwrap(), 3);
        assert_eq!(fx.store.count_unread_messages(fx.owner.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_conversations_show_counterpart() {
        let fx = fixture().await;
        let (proposal, _) = propose(&fx, barter(&fx)).await;
        let rows = fx.store.conversations(fx.requester.id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].swap_request_id, proposal.id);
        assert_eq!(rows[0].other_user_id, fx.owner.id);
        assert_eq!(rows[0].other_user_name, "Ada Owner");
        assert_eq!(rows[0].listing_title, "Bike");
        assert!(rows[0].last_message.is_none());
    }
}
