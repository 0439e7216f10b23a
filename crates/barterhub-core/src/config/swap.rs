//! Swap workflow settings.

use serde::{Deserialize, Serialize};

/// Behaviour switches for the swap-negotiation workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapConfig {
    /// Base URL of the web frontend, used to build listing deep links.
    #[serde(default = "default_frontend_base_url")]
    pub frontend_base_url: String,
    /// Whether accepting a money offer marks the requested listing as swapped.
    ///
    /// Off by default: accepted money offers leave listing status untouched.
    #[serde(default)]
    pub money_offer_marks_swapped: bool,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            frontend_base_url: default_frontend_base_url(),
            money_offer_marks_swapped: false,
        }
    }
}

impl SwapConfig {
    /// Deep link to a listing page, e.g. `https://host/items/10`.
    pub fn listing_link(&self, kind_path: &str, id: i64) -> String {
        format!(
            "{}/{}/{}",
            self.frontend_base_url.trim_end_matches('/'),
            kind_path,
            id
        )
    }
}

fn default_frontend_base_url() -> String {
    "http://localhost:3000".to_string()
}
