//! Response DTOs.

use serde::{Deserialize, Serialize};

use barterhub_core::types::{NotificationId, ProposalId};
use barterhub_entity::swap::ProposalStatus;
use barterhub_service::CreatedProposal;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Body of a created swap request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSwapResponse {
    pub request_id: ProposalId,
    pub notification_id: NotificationId,
    pub status: ProposalStatus,
}

impl From<CreatedProposal> for CreatedSwapResponse {
    fn from(created: CreatedProposal) -> Self {
        Self {
            request_id: created.proposal_id,
            notification_id: created.notification_id,
            status: created.status,
        }
    }
}

/// Count response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountResponse {
    /// Count value.
    pub count: i64,
}

impl CountResponse {
    /// Count of rows an update touched.
    pub fn from_rows(rows: u64) -> Self {
        Self {
            count: i64::try_from(rows).unwrap_or(i64::MAX),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// Version.
    pub version: String,
    /// Seconds since start.
    pub uptime_seconds: u64,
    /// Store reachability.
    pub store: String,
}
