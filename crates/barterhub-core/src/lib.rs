//! # barterhub-core
//!
//! Core crate for BarterHub. Contains configuration schemas, typed
//! identifiers, the outbound email value type, the traits implemented by
//! infrastructure crates, and the unified error system.
//!
//! This crate has **no** internal dependencies on other BarterHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
