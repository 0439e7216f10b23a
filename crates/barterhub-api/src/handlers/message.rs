//! Messaging handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use barterhub_core::types::ProposalId;
use barterhub_entity::message::{Conversation, ThreadMessage};

use crate::dto::request::{MarkReadRequest, SendMessageRequest};
use crate::dto::response::{ApiResponse, CountResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, ValidJson};
use crate::state::AppState;

/// POST /api/messages
pub async fn send(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<SendMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ThreadMessage>>), ApiError> {
    let sent = state
        .messaging_service
        .send(&auth, req.swap_request_id, &req.message, req.attachments)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(sent))))
}

/// GET /api/messages/swap-request/{id}
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProposalId>,
) -> Result<Json<ApiResponse<Vec<ThreadMessage>>>, ApiError> {
    let thread = state.messaging_service.list(&auth, id).await?;
    Ok(Json(ApiResponse::ok(thread)))
}

/// PUT /api/messages/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<MarkReadRequest>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let flipped = state
        .messaging_service
        .mark_read(&auth, req.swap_request_id)
        .await?;
    Ok(Json(ApiResponse::ok(CountResponse::from_rows(flipped))))
}

/// GET /api/messages/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.messaging_service.unread_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// GET /api/messages/conversations
pub async fn conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Conversation>>>, ApiError> {
    let inbox = state.messaging_service.conversations(&auth).await?;
    Ok(Json(ApiResponse::ok(inbox)))
}
