//! Tradable listing entities (items and services).

pub mod kind;
pub mod model;
pub mod status;

pub use kind::ListingKind;
pub use model::Listing;
pub use status::ListingStatus;
