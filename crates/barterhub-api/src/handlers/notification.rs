//! Notification handlers.

use axum::Json;
use axum::extract::{Path, State};

use barterhub_core::types::{NotificationId, UserId};
use barterhub_entity::notification::Notification;
use barterhub_service::{ProposalRef, RejectResult};

use crate::dto::response::{ApiResponse, CountResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /api/notifications/{id}
pub async fn list_open(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<ApiResponse<Vec<Notification>>>, ApiError> {
    let open = state.notification_service.list_open(&auth, user_id).await?;
    Ok(Json(ApiResponse::ok(open)))
}

/// GET /api/notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let count = state.notification_service.unread_count(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse { count })))
}

/// PUT /api/notifications/{id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<NotificationId>,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let flipped = state.notification_service.mark_read(&auth, id).await?;
    Ok(Json(ApiResponse::ok(CountResponse::from_rows(flipped))))
}

/// PUT /api/notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<CountResponse>>, ApiError> {
    let flipped = state.notification_service.mark_all_read(&auth).await?;
    Ok(Json(ApiResponse::ok(CountResponse::from_rows(flipped))))
}

/// POST /api/notifications/{id}/reject
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<NotificationId>,
) -> Result<Json<ApiResponse<RejectResult>>, ApiError> {
    let result = state
        .swap_service
        .reject(&auth, ProposalRef::Notification(id))
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}
