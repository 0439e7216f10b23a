//! Per-proposal chat.

mod common;

use barterhub_core::error::ErrorKind;
use barterhub_core::types::ProposalId;
use chrono::Duration;

use common::Harness;

async fn proposal(h: &Harness) -> ProposalId {
    h.swaps
        .create(&h.as_requester(), &h.barter_input())
        .await
        .unwrap()
        .proposal_id
}

#[tokio::test]
async fn test_send_and_list_in_order() {
    let h = Harness::new().await;
    let id = proposal(&h).await;

    let sent = h
        .messages
        .send(&h.as_requester(), id, "Is the bike still available?", vec![])
        .await
        .unwrap();
    assert_eq!(sent.sender_name, "Ben Franklin");
    assert_eq!(sent.message.receiver_id, h.owner.id);

    h.clock.advance(Duration::seconds(30));
    h.messages
        .send(
            &h.as_owner(),
            id,
            "Yes, come by tomorrow",
            vec!["https://cdn.example.com/bike.jpg".into()],
        )
        .await
        .unwrap();

    let thread = h.messages.list(&h.as_owner(), id).await.unwrap();
    let bodies: Vec<_> = thread.iter().map(|m| m.message.body.as_str()).collect();
    assert_eq!(bodies, ["Is the bike still available?", "Yes, come by tomorrow"]);
    assert_eq!(thread[0].sender_name, "Ben Franklin");
    assert_eq!(thread[1].sender_name, "Ada Lovelace");
    assert_eq!(thread[1].message.attachments.len(), 1);
}

#[tokio::test]
async fn test_listing_marks_thread_read() {
    let h = Harness::new().await;
    let id = proposal(&h).await;
    h.messages
        .send(&h.as_requester(), id, "Hello", vec![])
        .await
        .unwrap();
    assert_eq!(h.messages.unread_count(&h.as_owner()).await.unwrap(), 1);

    h.messages.list(&h.as_owner(), id).await.unwrap();
    assert_eq!(h.messages.unread_count(&h.as_owner()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_send_creates_message_notification() {
    let h = Harness::new().await;
    let id = proposal(&h).await;
    let before = h.store.notification_count().await;

    h.messages
        .send(&h.as_requester(), id, "Hello", vec![])
        .await
        .unwrap();
    assert_eq!(h.store.notification_count().await, before + 1);
    // Message notifications never show up among open swap requests.
    let open = h
        .notifications
        .list_open(&h.as_owner(), h.owner.id)
        .await
        .unwrap();
    assert_eq!(open.len(), 1);
    assert!(open[0].is_swap_proposal());
}

#[tokio::test]
async fn test_third_user_is_forbidden() {
    let h = Harness::new().await;
    let id = proposal(&h).await;

    let err = h
        .messages
        .send(&h.as_stranger(), id, "Let me in", vec![])
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);

    let err = h.messages.list(&h.as_stranger(), id).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Forbidden);
}

#[tokio::test]
async fn test_send_validates_body_and_attachments() {
    let h = Harness::new().await;
    let id = proposal(&h).await;

    let err = h
        .messages
        .send(&h.as_requester(), id, "   ", vec![])
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let too_many = (0..11).map(|i| format!("https://cdn.example.com/{i}.jpg")).collect();
    let err = h
        .messages
        .send(&h.as_requester(), id, "photos", too_many)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_unknown_proposal_is_not_found() {
    let h = Harness::new().await;
    let err = h
        .messages
        .send(&h.as_requester(), ProposalId::new(777), "hi", vec![])
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_conversations_list_counterpart_and_unread() {
    let h = Harness::new().await;
    let id = proposal(&h).await;
    h.messages
        .send(&h.as_requester(), id, "Ping", vec![])
        .await
        .unwrap();

    let inbox = h.messages.conversations(&h.as_owner()).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].other_user_id, h.requester.id);
    assert_eq!(inbox[0].other_user_name, "Ben Franklin");
    assert_eq!(inbox[0].listing_title, "Road Bike");
    assert_eq!(inbox[0].last_message.as_deref(), Some("Ping"));
    assert_eq!(inbox[0].unread_count, 1);

    assert_eq!(h.messages.mark_read(&h.as_owner(), id).await.unwrap(), 1);
    assert!(h.messages.conversations(&h.as_stranger()).await.unwrap().is_empty());
}
