//! Per-proposal chat between the two swap participants.

pub mod service;

pub use service::MessagingService;
