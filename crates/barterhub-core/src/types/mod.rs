//! Core type definitions used across the BarterHub workspace.

pub mod email;
pub mod id;
pub mod pagination;

pub use email::OutgoingEmail;
pub use id::*;
pub use pagination::{PageRequest, PageResponse};
