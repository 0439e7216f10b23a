//! HTTP request handlers, one module per domain.

pub mod health;
pub mod message;
pub mod notification;
pub mod swap;
