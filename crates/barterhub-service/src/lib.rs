//! # barterhub-service
//!
//! Business logic for swap negotiation. Services follow constructor
//! injection: stores, the email transport and the clock are provided at
//! construction time via `Arc` references.
//!
//! - [`SwapService`] drives proposals from creation through accept/reject.
//! - [`NotificationDispatcher`] isolates email delivery from state changes.
//! - [`NotificationService`] reads the notification ledger.
//! - [`MessagingService`] runs the per-proposal chat.

pub mod context;
pub mod deadline;
pub mod message;
pub mod notification;
pub mod swap;

pub use context::RequestContext;
pub use deadline::StoreDeadline;
pub use message::MessagingService;
pub use notification::{DeliveryReport, NotificationDispatcher, NotificationService};
pub use swap::{
    AcceptResult, CreateProposalInput, CreatedProposal, ProposalRef, ProposalSummary,
    RejectResult, SwapService,
};
