//! Proposal lifecycle status.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a swap proposal.
///
/// `Pending` is the only non-terminal state. `Accepted` and `Rejected`
/// admit no further transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "proposal_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Awaiting a decision from the requested listing's owner.
    Pending,
    /// Accepted; listings swapped unless the offer was money.
    Accepted,
    /// Declined or withdrawn.
    Rejected,
}

impl ProposalStatus {
    /// Check if the proposal is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
