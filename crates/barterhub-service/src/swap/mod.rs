//! Swap proposal lifecycle.

pub mod input;
pub mod service;
pub mod wording;

pub use input::CreateProposalInput;
pub use service::{
    AcceptResult, CreatedProposal, ProposalRef, ProposalSummary, RejectResult, SwapService,
};
