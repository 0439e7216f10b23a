//! The consideration side of a swap proposal.

use barterhub_core::AppError;
use barterhub_core::types::ListingId;
use serde::{Deserialize, Serialize};

use super::Money;
use crate::listing::ListingKind;

/// What the requester gives in exchange for the requested listing.
///
/// Exactly one of an offered listing or a money amount, never both and
/// never neither. Storage rows carry the flattened columns; use
/// [`SwapOffer::from_columns`] and [`SwapOffer::columns`] to cross that
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SwapOffer {
    /// Another listing owned by the requester.
    Barter {
        /// Offered listing.
        offered_id: ListingId,
        /// Offered listing kind.
        offered_kind: ListingKind,
    },
    /// A cash offer.
    Money {
        /// Offered amount.
        amount: Money,
    },
}

/// Flattened storage representation: `(is_money_offer, offered_id, offered_kind, money_amount)`.
pub type OfferColumns = (bool, Option<ListingId>, Option<ListingKind>, Option<Money>);

impl SwapOffer {
    /// Rebuild an offer from its storage columns, rejecting mixed rows.
    pub fn from_columns(
        is_money_offer: bool,
        offered_id: Option<ListingId>,
        offered_kind: Option<ListingKind>,
        money_amount: Option<Money>,
    ) -> Result<Self, AppError> {
        match (is_money_offer, offered_id, offered_kind, money_amount) {
            (true, None, None, Some(amount)) => Ok(Self::Money { amount }),
            (false, Some(offered_id), Some(offered_kind), None) => Ok(Self::Barter {
                offered_id,
                offered_kind,
            }),
            _ => Err(AppError::internal(
                "Stored offer violates money/listing exclusivity",
            )),
        }
    }

    /// Flatten into storage columns.
    pub fn columns(&self) -> OfferColumns {
        match *self {
            Self::Barter {
                offered_id,
                offered_kind,
            } => (false, Some(offered_id), Some(offered_kind), None),
            Self::Money { amount } => (true, None, None, Some(amount)),
        }
    }

    /// Whether the offer is cash.
    pub fn is_money_offer(&self) -> bool {
        matches!(self, Self::Money { .. })
    }

    /// The offered listing, for barter offers.
    pub fn offered_listing(&self) -> Option<(ListingId, ListingKind)> {
        match *self {
            Self::Barter {
                offered_id,
                offered_kind,
            } => Some((offered_id, offered_kind)),
            Self::Money { .. } => None,
        }
    }

    /// The offered amount, for money offers.
    pub fn money(&self) -> Option<Money> {
        match *self {
            Self::Money { amount } => Some(amount),
            Self::Barter { .. } => None,
        }
    }
}
