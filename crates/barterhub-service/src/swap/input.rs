//! Raw proposal input and its validation.

use serde::{Deserialize, Serialize};

use barterhub_core::error::AppError;
use barterhub_core::types::ListingId;
use barterhub_entity::listing::ListingKind;
use barterhub_entity::swap::{Money, SwapOffer};

/// Proposal fields as submitted by a client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProposalInput {
    /// Listing being asked for.
    pub requested_id: ListingId,
    /// `"item"` or `"service"`.
    pub requested_type: String,
    /// Listing offered in exchange (barter offers).
    pub offered_id: Option<ListingId>,
    /// `"item"` or `"service"` (barter offers).
    pub offered_type: Option<String>,
    /// Dollar amount (money offers).
    pub money_amount: Option<f64>,
    /// Explicit discriminant; inferred from `money_amount` when absent.
    pub is_money_offer: Option<bool>,
}

/// Input after validation: kinds parsed and the offer made exclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedProposal {
    pub requested_id: ListingId,
    pub requested_kind: ListingKind,
    pub offer: SwapOffer,
}

impl CreateProposalInput {
    /// Check field presence, kinds and amount; build the exclusive offer.
    pub fn validate(&self) -> Result<ValidatedProposal, AppError> {
        let requested_kind: ListingKind = self.requested_type.parse()?;
        let is_money_offer = self
            .is_money_offer
            .unwrap_or(self.money_amount.is_some());

        let offer = if is_money_offer {
            if self.offered_id.is_some() || self.offered_type.is_some() {
                return Err(AppError::validation(
                    "A money offer cannot also offer a listing",
                ));
            }
            let amount = self
                .money_amount
                .ok_or_else(|| AppError::validation("money_amount is required for a money offer"))?;
            SwapOffer::Money {
                amount: Money::from_amount(amount)?,
            }
        } else {
            if self.money_amount.is_some() {
                return Err(AppError::validation(
                    "A barter offer cannot also carry a money amount",
                ));
            }
            let (Some(offered_id), Some(offered_type)) = (self.offered_id, &self.offered_type)
            else {
                return Err(AppError::validation(
                    "offered_id and offered_type are required for a barter offer",
                ));
            };
            SwapOffer::Barter {
                offered_id,
                offered_kind: offered_type.parse()?,
            }
        };

        Ok(ValidatedProposal {
            requested_id: self.requested_id,
            requested_kind,
            offer,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use barterhub_core::ErrorKind;

    fn barter() -> CreateProposalInput {
        CreateProposalInput {
            requested_id: ListingId::new(10),
            requested_type: "item".to_string(),
            offered_id: Some(ListingId::new(20)),
            offered_type: Some("service".to_string()),
            ..Default::default()
        }
    }

    fn money(amount: f64) -> CreateProposalInput {
        CreateProposalInput {
            requested_id: ListingId::new(10),
            requested_type: "service".to_string(),
            money_amount: Some(amount),
            is_money_offer: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_barter() {
        let v = barter().validate().unwrap();
        assert_eq!(v.requested_kind, ListingKind::Item);
        assert_eq!(
            v.offer.offered_listing(),
            Some((ListingId::new(20), ListingKind::Service))
        );
    }

    #[test]
    fn test_valid_money_offer_with_inferred_flag() {
        let mut input = money(50.0);
        input.is_money_offer = None;
        let v = input.validate().unwrap();
        assert!(v.offer.is_money_offer());
        assert_eq!(v.offer.money().map(|m| m.cents()), Some(5000));
    }

    #[test]
    fn test_rejects_unknown_kinds() {
        let mut input = barter();
        input.requested_type = "vehicle".to_string();
        assert_eq!(input.validate().unwrap_err().kind, ErrorKind::Validation);

        let mut input = barter();
        input.offered_type = Some("car".to_string());
        assert_eq!(input.validate().unwrap_err().kind, ErrorKind::Validation);
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        assert!(money(0.0).validate().is_err());
        assert!(money(-3.0).validate().is_err());
        assert!(money(f64::NAN).validate().is_err());
    }

    #[test]
    fn test_rejects_mixed_and_empty_offers() {
        let mut both = barter();
        both.money_amount = Some(10.0);
        both.is_money_offer = Some(false);
        assert!(both.validate().is_err());

        let mut both = money(10.0);
        both.offered_id = Some(ListingId::new(3));
        assert!(both.validate().is_err());

        let mut neither = barter();
        neither.offered_id = None;
        assert!(neither.validate().is_err());

        let mut flagged_without_amount = barter();
        flagged_without_amount.offered_id = None;
        flagged_without_amount.offered_type = None;
        flagged_without_amount.is_money_offer = Some(true);
        assert!(flagged_without_amount.validate().is_err());
    }
}
