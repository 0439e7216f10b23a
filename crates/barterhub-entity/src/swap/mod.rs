//! Swap proposal entities.

pub mod model;
pub mod money;
pub mod offer;
pub mod status;

pub use model::{NewProposal, ProposalRole, SwapProposal, SwapProposalRow};
pub use money::Money;
pub use offer::SwapOffer;
pub use status::ProposalStatus;
