//! Swap request handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use barterhub_core::types::{NotificationId, PageResponse, ProposalId};
use barterhub_entity::swap::SwapProposal;
use barterhub_service::{AcceptResult, ProposalRef, ProposalSummary, RejectResult};

use crate::dto::request::CreateSwapRequest;
use crate::dto::response::{ApiResponse, CreatedSwapResponse};
use crate::error::ApiError;
use crate::extractors::{AuthUser, PaginationParams, ValidJson};
use crate::state::AppState;

/// POST /api/swap-requests
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidJson(req): ValidJson<CreateSwapRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedSwapResponse>>), ApiError> {
    let created = state.swap_service.create(&auth, &req.into_input()).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created.into()))))
}

/// GET /api/swap-requests
pub async fn list(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<PaginationParams>,
) -> Result<Json<ApiResponse<PageResponse<ProposalSummary>>>, ApiError> {
    let page = state
        .swap_service
        .list_for_user(&auth, params.into_page_request())
        .await?;
    Ok(Json(ApiResponse::ok(page)))
}

/// GET /api/swap-requests/{id}
pub async fn get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<ProposalId>,
) -> Result<Json<ApiResponse<SwapProposal>>, ApiError> {
    let proposal = state.swap_service.get(&auth, id).await?;
    Ok(Json(ApiResponse::ok(proposal)))
}

/// POST /api/swap-requests/accept/{notification_id}
pub async fn accept(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(notification_id): Path<NotificationId>,
) -> Result<Json<ApiResponse<AcceptResult>>, ApiError> {
    let result = state.swap_service.accept(&auth, notification_id).await?;
    Ok(Json(ApiResponse::ok(result)))
}

/// POST /api/swap-requests/reject/{request_id}
pub async fn reject(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(request_id): Path<ProposalId>,
) -> Result<Json<ApiResponse<RejectResult>>, ApiError> {
    let result = state
        .swap_service
        .reject(&auth, ProposalRef::Proposal(request_id))
        .await?;
    Ok(Json(ApiResponse::ok(result)))
}
