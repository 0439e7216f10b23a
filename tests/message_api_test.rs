//! Integration tests for the messaging endpoints.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_send_returns_created_with_sender_name() {
    let app = helpers::TestApp::new().await;
    let (request_id, _) = app.create_barter().await;

    let response = app
        .request_as(
            &app.requester,
            "POST",
            "/api/messages",
            Some(serde_json::json!({
                "swapRequestId": request_id,
                "message": "When can we meet?",
                "attachments": ["https://cdn.example.com/guitar.jpg"],
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(response.body["data"]["sender_name"], "Ben Franklin");
    assert_eq!(response.body["data"]["body"], "When can we meet?");
    assert_eq!(response.body["data"]["receiver_id"], app.owner.id.get());
}

#[tokio::test]
async fn test_thread_is_private_to_participants() {
    let app = helpers::TestApp::new().await;
    let (request_id, _) = app.create_barter().await;

    let response = app
        .request_as(
            &app.stranger,
            "GET",
            &format!("/api/messages/swap-request/{request_id}"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request_as(
            &app.stranger,
            "POST",
            "/api/messages",
            Some(serde_json::json!({ "swapRequestId": request_id, "message": "hi" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_read_flow() {
    let app = helpers::TestApp::new().await;
    let (request_id, _) = app.create_barter().await;

    for text in ["First", "Second"] {
        let response = app
            .request_as(
                &app.requester,
                "POST",
                "/api/messages",
                Some(serde_json::json!({ "swapRequestId": request_id, "message": text })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let unread = app
        .request_as(&app.owner, "GET", "/api/messages/unread-count", None)
        .await;
    assert_eq!(unread.body["data"]["count"], 2);

    let inbox = app
        .request_as(&app.owner, "GET", "/api/messages/conversations", None)
        .await;
    assert_eq!(inbox.status, StatusCode::OK);
    assert_eq!(inbox.body["data"][0]["unread_count"], 2);
    assert_eq!(inbox.body["data"][0]["listing_title"], "Road Bike");

    let marked = app
        .request_as(
            &app.owner,
            "PUT",
            "/api/messages/read",
            Some(serde_json::json!({ "swapRequestId": request_id })),
        )
        .await;
    assert_eq!(marked.status, StatusCode::OK);
    assert_eq!(marked.body["data"]["count"], 2);

    let unread = app
        .request_as(&app.owner, "GET", "/api/messages/unread-count", None)
        .await;
    assert_eq!(unread.body["data"]["count"], 0);
}

#[tokio::test]
async fn test_empty_message_is_rejected() {
    let app = helpers::TestApp::new().await;
    let (request_id, _) = app.create_barter().await;

    let response = app
        .request_as(
            &app.requester,
            "POST",
            "/api/messages",
            Some(serde_json::json!({ "swapRequestId": request_id, "message": "" })),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_returns_thread_in_order() {
    let app = helpers::TestApp::new().await;
    let (request_id, _) = app.create_barter().await;

    for (user, text) in [(&app.requester, "Hi"), (&app.owner, "Hello back")] {
        app.request_as(
            user,
            "POST",
            "/api/messages",
            Some(serde_json::json!({ "swapRequestId": request_id, "message": text })),
        )
        .await;
    }

    let response = app
        .request_as(
            &app.owner,
            "GET",
            &format!("/api/messages/swap-request/{request_id}"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let thread = response.body["data"].as_array().expect("array");
    assert_eq!(thread.len(), 2);
    assert_eq!(thread[0]["body"], "Hi");
    assert_eq!(thread[0]["sender_name"], "Ben Franklin");
    assert_eq!(thread[1]["body"], "Hello back");
    assert_eq!(thread[1]["sender_name"], "Ada Lovelace");
    assert_eq!(thread[1]["sender_id"], app.owner.id.get());
}

#[tokio::test]
async fn test_snake_case_bodies_are_accepted() {
    let app = helpers::TestApp::new().await;
    let (request_id, _) = app.create_barter().await;

    let response = app
        .request_as(
            &app.requester,
            "POST",
            "/api/messages",
            Some(serde_json::json!({
                "swap_request_id": request_id,
                "message": "hi",
                "attachments": "[\"https://cdn.example.com/guitar.jpg\"]",
            })),
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    assert_eq!(
        response.body["data"]["attachments"][0],
        "https://cdn.example.com/guitar.jpg"
    );

    let marked = app
        .request_as(
            &app.owner,
            "PUT",
            "/api/messages/read",
            Some(serde_json::json!({ "swap_request_id": request_id })),
        )
        .await;
    assert_eq!(marked.status, StatusCode::OK, "{}", marked.body);
    assert_eq!(marked.body["data"]["count"], 1);
}
