//! Integration tests for the notification endpoints.

mod helpers;

use axum::http::StatusCode;

#[tokio::test]
async fn test_list_open_notifications() {
    let app = helpers::TestApp::new().await;
    let (request_id, notification_id) = app.create_barter().await;

    let response = app
        .request_as(
            &app.owner,
            "GET",
            &format!("/api/notifications/{}", app.owner.id),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let items = response.body["data"].as_array().expect("array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], notification_id);
    assert_eq!(items[0]["swap_request_id"], request_id);
    assert_eq!(items[0]["title"], "New Swap Request");
    assert_eq!(items[0]["accepted"], false);
}

#[tokio::test]
async fn test_empty_ledger_is_not_found() {
    let app = helpers::TestApp::new().await;

    let response = app
        .request_as(
            &app.owner,
            "GET",
            &format!("/api/notifications/{}", app.owner.id),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "No notifications found");
}

#[tokio::test]
async fn test_reading_another_users_ledger_is_forbidden() {
    let app = helpers::TestApp::new().await;
    app.create_barter().await;

    let response = app
        .request_as(
            &app.stranger,
            "GET",
            &format!("/api/notifications/{}", app.owner.id),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_reject_by_notification_closes_it() {
    let app = helpers::TestApp::new().await;
    let (_, notification_id) = app.create_barter().await;

    let response = app
        .request_as(
            &app.owner,
            "POST",
            &format!("/api/notifications/{notification_id}/reject"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["outcome"], "rejected");

    let open = app
        .request_as(
            &app.owner,
            "GET",
            &format!("/api/notifications/{}", app.owner.id),
            None,
        )
        .await;
    assert_eq!(open.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unread_count() {
    let app = helpers::TestApp::new().await;
    app.create_barter().await;

    let response = app
        .request_as(&app.owner, "GET", "/api/notifications/unread-count", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["count"], 1);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = helpers::TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["store"], "connected");
}

#[tokio::test]
async fn test_mark_read_lowers_unread_count() {
    let app = helpers::TestApp::new().await;
    let (request_id, notification_id) = app.create_barter().await;

    let unread = app
        .request_as(&app.owner, "GET", "/api/notifications/unread-count", None)
        .await;
    assert_eq!(unread.body["data"]["count"], 1);

    let response = app
        .request_as(
            &app.stranger,
            "PUT",
            &format!("/api/notifications/{notification_id}/read"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request_as(
            &app.owner,
            "PUT",
            &format!("/api/notifications/{notification_id}/read"),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK, "{}", response.body);
    assert_eq!(response.body["data"]["count"], 1);

    let unread = app
        .request_as(&app.owner, "GET", "/api/notifications/unread-count", None)
        .await;
    assert_eq!(unread.body["data"]["count"], 0);

    let response = app
        .request_as(&app.owner, "PUT", "/api/notifications/999999/read", None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    for text in ["First", "Second"] {
        app.request_as(
            &app.requester,
            "POST",
            "/api/messages",
            Some(serde_json::json!({ "swapRequestId": request_id, "message": text })),
        )
        .await;
    }
    let unread = app
        .request_as(&app.owner, "GET", "/api/notifications/unread-count", None)
        .await;
    assert_eq!(unread.body["data"]["count"], 2);

    let response = app
        .request_as(&app.owner, "PUT", "/api/notifications/read-all", None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["count"], 2);

    let unread = app
        .request_as(&app.owner, "GET", "/api/notifications/unread-count", None)
        .await;
    assert_eq!(unread.body["data"]["count"], 0);
}
