//! Shared test helpers for HTTP integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use barterhub_api::AppState;
use barterhub_auth::JwtEncoder;
use barterhub_core::config::{AppConfig, StoreProvider};
use barterhub_core::traits::SystemClock;
use barterhub_database::MemoryStore;
use barterhub_entity::listing::{Listing, ListingKind, ListingStatus};
use barterhub_entity::user::UserProfile;
use barterhub_mail::RecordingTransport;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for draining background emails
    pub state: AppState,
    /// In-memory store for seeding and direct inspection
    pub store: Arc<MemoryStore>,
    /// Captures outgoing email
    pub mail: Arc<RecordingTransport>,
    encoder: JwtEncoder,
    pub owner: UserProfile,
    pub requester: UserProfile,
    pub stranger: UserProfile,
    pub bike: Listing,
    pub guitar: Listing,
}

/// Parsed response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    /// Create a new test application
    pub async fn new() -> Self {
        let mut config = AppConfig::default();
        config.database.provider = StoreProvider::Memory;
        config.auth.jwt_secret = "integration-test-secret".to_string();
        config.validate().expect("test config is valid");

        let store = Arc::new(MemoryStore::new());
        let mail = Arc::new(RecordingTransport::new());
        let encoder = JwtEncoder::new(&config.auth);

        let owner = store
            .insert_user("Ada", "Lovelace", "ada@example.com", Some("555-0100"), Some("London"))
            .await;
        let requester = store
            .insert_user("Ben", "Franklin", "ben@example.com", None, Some("Philadelphia"))
            .await;
        let stranger = store
            .insert_user("Cy", "Stranger", "cy@example.com", None, None)
            .await;
        let bike = store
            .insert_listing(ListingKind::Item, owner.id, "Road Bike", ListingStatus::Published)
            .await;
        let guitar = store
            .insert_listing(ListingKind::Service, requester.id, "Guitar Lessons", ListingStatus::Published)
            .await;

        let state = AppState::new(
            config,
            store.clone(),
            store.clone(),
            mail.clone(),
            Arc::new(SystemClock),
        );
        let router = barterhub_api::build_router(state.clone());

        Self {
            router,
            state,
            store,
            mail,
            encoder,
            owner,
            requester,
            stranger,
            bike,
            guitar,
        }
    }

    /// Bearer token for a seeded user
    pub fn token_for(&self, user: &UserProfile) -> String {
        self.encoder.issue(user.id).expect("token")
    }

    /// Make an HTTP request against the router
    pub async fn request(
        &self,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Request as a seeded user
    pub async fn request_as(
        &self,
        user: &UserProfile,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> TestResponse {
        let token = self.token_for(user);
        self.request(method, uri, body, Some(&token)).await
    }

    /// Propose the guitar lessons for the bike; returns (request id, notification id).
    pub async fn create_barter(&self) -> (i64, i64) {
        let response = self
            .request_as(
                &self.requester,
                "POST",
                "/api/swap-requests",
                Some(serde_json::json!({
                    "requestedId": self.bike.id.get(),
                    "requestedType": "item",
                    "offeredId": self.guitar.id.get(),
                    "offeredType": "service",
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
        (
            response.body["data"]["requestId"].as_i64().expect("requestId"),
            response.body["data"]["notificationId"]
                .as_i64()
                .expect("notificationId"),
        )
    }
}
