//! Shared wiring for service tests: in-memory store, recording mailer, frozen clock.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use barterhub_core::config::SwapConfig;
use barterhub_core::traits::ManualClock;
use barterhub_core::types::ListingId;
use barterhub_database::MemoryStore;
use barterhub_entity::listing::{Listing, ListingKind, ListingStatus};
use barterhub_entity::user::UserProfile;
use barterhub_mail::RecordingTransport;
use barterhub_service::{
    CreateProposalInput, MessagingService, NotificationDispatcher, NotificationService,
    RequestContext, StoreDeadline, SwapService,
};

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub mail: Arc<RecordingTransport>,
    pub clock: Arc<ManualClock>,
    pub dispatcher: NotificationDispatcher,
    pub swaps: SwapService,
    pub notifications: NotificationService,
    pub messages: MessagingService,
    pub owner: UserProfile,
    pub requester: UserProfile,
    pub stranger: UserProfile,
    pub bike: Listing,
    pub guitar: Listing,
}

impl Harness {
    pub async fn new() -> Self {
        Self::with_config(SwapConfig::default()).await
    }

    pub async fn with_config(config: SwapConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let mail = Arc::new(RecordingTransport::new());
        let clock = Arc::new(ManualClock::new(Utc::now()));
        let dispatcher = NotificationDispatcher::new(mail.clone(), Duration::from_secs(2));
        let deadline = StoreDeadline::from_millis(5_000);

        let swaps = SwapService::new(
            store.clone(),
            dispatcher.clone(),
            clock.clone(),
            config,
            deadline,
        );
        let notifications = NotificationService::new(store.clone(), deadline);
        let messages = MessagingService::new(store.clone(), store.clone(), clock.clone(), deadline);

        let owner = store
            .insert_user("Ada", "Lovelace", "ada@example.com", Some("555-0100"), Some("London"))
            .await;
        let requester = store
            .insert_user("Ben", "Franklin", "ben@example.com", None, None)
            .await;
        let stranger = store
            .insert_user("Cy", "Stranger", "cy@example.com", None, None)
            .await;
        let bike = store
            .insert_listing(ListingKind::Item, owner.id, "Road Bike", ListingStatus::Published)
            .await;
        let guitar = store
            .insert_listing(ListingKind::Item, requester.id, "Acoustic Guitar", ListingStatus::Published)
            .await;

        Self {
            store,
            mail,
            clock,
            dispatcher,
            swaps,
            notifications,
            messages,
            owner,
            requester,
            stranger,
            bike,
            guitar,
        }
    }

    pub fn as_owner(&self) -> RequestContext {
        RequestContext::new(self.owner.id)
    }

    pub fn as_requester(&self) -> RequestContext {
        RequestContext::new(self.requester.id)
    }

    pub fn as_stranger(&self) -> RequestContext {
        RequestContext::new(self.stranger.id)
    }

    /// Guitar for the bike.
    pub fn barter_input(&self) -> CreateProposalInput {
        CreateProposalInput {
            requested_id: self.bike.id,
            requested_type: "item".into(),
            offered_id: Some(self.guitar.id),
            offered_type: Some("item".into()),
            ..Default::default()
        }
    }

    /// Cash for the bike.
    pub fn money_input(&self, amount: f64) -> CreateProposalInput {
        CreateProposalInput {
            requested_id: self.bike.id,
            requested_type: "item".into(),
            money_amount: Some(amount),
            is_money_offer: Some(true),
            ..Default::default()
        }
    }

    pub async fn status_of(&self, id: ListingId) -> ListingStatus {
        self.store
            .listing(id)
            .await
            .map(|l| l.status)
            .expect("listing exists")
    }

    /// Wait for background email sends.
    pub async fn drain_mail(&self) {
        assert!(self.dispatcher.drain(Duration::from_secs(5)).await);
    }
}
