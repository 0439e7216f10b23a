//! Human-readable proposal text.

use barterhub_entity::listing::Listing;
use barterhub_entity::swap::Money;

/// "X is interested in buying your item 'Bike' for $50"
pub fn money_offer(requester_name: &str, requested: &Listing, amount: Money) -> String {
    format!(
        "{requester_name} is interested in buying your {} '{}' for ${amount}",
        requested.kind, requested.title
    )
}

/// "X is interested in swapping their item 'Guitar' for your item 'Bike'"
pub fn barter_offer(requester_name: &str, offered: &Listing, requested: &Listing) -> String {
    format!(
        "{requester_name} is interested in swapping their {} '{}' for your {} '{}'",
        offered.kind, offered.title, requested.kind, requested.title
    )
}
