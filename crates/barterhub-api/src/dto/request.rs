//! Request DTOs with validation.
//!
//! Field names follow the marketplace clients' camelCase wire format. The
//! messaging bodies also accept the snake_case `swap_request_id` older
//! clients send.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use barterhub_core::types::{ListingId, ProposalId};
use barterhub_service::CreateProposalInput;

/// Create swap request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSwapRequest {
    /// Listing being asked for.
    #[validate(range(min = 1, message = "requestedId must be a positive id"))]
    pub requested_id: i64,
    /// `item` or `service`.
    #[validate(length(min = 1, message = "requestedType is required"))]
    pub requested_type: String,
    /// Listing offered in exchange.
    #[validate(range(min = 1, message = "offeredId must be a positive id"))]
    pub offered_id: Option<i64>,
    /// `item` or `service`.
    pub offered_type: Option<String>,
    /// Dollar amount for money offers.
    pub money_amount: Option<f64>,
    /// Explicit offer discriminant.
    pub is_money_offer: Option<bool>,
}

impl CreateSwapRequest {
    /// Converts into the service input.
    pub fn into_input(self) -> CreateProposalInput {
        CreateProposalInput {
            requested_id: ListingId::new(self.requested_id),
            requested_type: self.requested_type,
            offered_id: self.offered_id.map(ListingId::new),
            offered_type: self.offered_type,
            money_amount: self.money_amount,
            is_money_offer: self.is_money_offer,
        }
    }
}

/// Send message body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// Proposal the thread belongs to.
    #[serde(alias = "swap_request_id")]
    pub swap_request_id: ProposalId,
    /// Message text.
    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,
    /// Attachment URLs, as a JSON array or a JSON-encoded array string.
    #[serde(default, deserialize_with = "attachment_list")]
    #[validate(length(max = 10, message = "At most 10 attachments are allowed"))]
    pub attachments: Vec<String>,
}

/// Mark-read body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadRequest {
    /// Thread to mark as read.
    #[serde(alias = "swap_request_id")]
    pub swap_request_id: ProposalId,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AttachmentField {
    List(Vec<String>),
    Encoded(String),
}

fn attachment_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<AttachmentField>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(AttachmentField::List(urls)) => Ok(urls),
        Some(AttachmentField::Encoded(raw)) if raw.trim().is_empty() => Ok(Vec::new()),
        Some(AttachmentField::Encoded(raw)) => serde_json::from_str(&raw).map_err(|e| {
            serde::de::Error::custom(format!("attachments must be a list of URLs: {e}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_reads_camel_case() {
        let req: CreateSwapRequest = serde_json::from_value(serde_json::json!({
            "requestedId": 10,
            "requestedType": "item",
            "moneyAmount": 50.0,
            "isMoneyOffer": true
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        let input = req.into_input();
        assert_eq!(input.requested_id, ListingId::new(10));
        assert_eq!(input.money_amount, Some(50.0));
        assert!(input.offered_id.is_none());
    }

    #[test]
    fn test_create_request_rejects_non_positive_ids() {
        let req = CreateSwapRequest {
            requested_id: 0,
            requested_type: "item".into(),
            offered_id: None,
            offered_type: None,
            money_amount: Some(1.0),
            is_money_offer: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_send_message_limits_attachments() {
        let req = SendMessageRequest {
            swap_request_id: ProposalId::new(1),
            message: "hi".into(),
            attachments: vec!["https://cdn.example.com/a.jpg".into(); 11],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_send_message_accepts_snake_case_id() {
        let req: SendMessageRequest = serde_json::from_value(serde_json::json!({
            "swap_request_id": 7,
            "message": "hi"
        }))
        .unwrap();
        assert_eq!(req.swap_request_id, ProposalId::new(7));
        assert!(req.attachments.is_empty());

        let read: MarkReadRequest =
            serde_json::from_value(serde_json::json!({ "swap_request_id": 7 })).unwrap();
        assert_eq!(read.swap_request_id, ProposalId::new(7));
    }

    #[test]
    fn test_send_message_accepts_encoded_attachments() {
        let req: SendMessageRequest = serde_json::from_value(serde_json::json!({
            "swapRequestId": 3,
            "message": "photos",
            "attachments": "[\"https://cdn.example.com/a.jpg\",\"https://cdn.example.com/b.jpg\"]"
        }))
        .unwrap();
        assert_eq!(req.attachments.len(), 2);
        assert_eq!(req.attachments[0], "https://cdn.example.com/a.jpg");

        let null: SendMessageRequest = serde_json::from_value(serde_json::json!({
            "swapRequestId": 3,
            "message": "none",
            "attachments": null
        }))
        .unwrap();
        assert!(null.attachments.is_empty());

        let bad = serde_json::from_value::<SendMessageRequest>(serde_json::json!({
            "swapRequestId": 3,
            "message": "bad",
            "attachments": "not json"
        }));
        assert!(bad.is_err());
    }
}
