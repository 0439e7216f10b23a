//! Listing kind enumeration.

use std::fmt;
use std::str::FromStr;

use barterhub_core::AppError;
use serde::{Deserialize, Serialize};

/// Which table family a tradable entity belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "listing_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ListingKind {
    /// A physical item.
    Item,
    /// A service offering.
    Service,
}

impl ListingKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Service => "service",
        }
    }

    /// Path segment used by frontend deep links.
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Item => "items",
            Self::Service => "services",
        }
    }
}

impl fmt::Display for ListingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ListingKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "item" => Ok(Self::Item),
            "service" => Ok(Self::Service),
            other => Err(AppError::validation(format!(
                "Invalid listing type '{other}': expected 'item' or 'service'"
            ))),
        }
    }
}
