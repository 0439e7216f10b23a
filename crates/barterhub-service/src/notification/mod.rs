//! Notification ledger reads and email dispatch.

pub mod compose;
pub mod dispatcher;
pub mod service;

pub use dispatcher::{DeliveryReport, NotificationDispatcher};
pub use service::NotificationService;
