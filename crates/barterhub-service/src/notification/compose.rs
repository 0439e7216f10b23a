//! Email bodies for swap events.

use barterhub_core::types::OutgoingEmail;
use barterhub_entity::user::UserProfile;

/// Multi-line contact card shared when a swap is accepted.
pub fn contact_card(profile: &UserProfile) -> String {
    let mut card = format!("Name: {}\nEmail: {}", profile.display_name(), profile.email);
    if let Some(phone) = profile.phone.as_deref().filter(|p| !p.is_empty()) {
        card.push_str(&format!("\nPhone: {phone}"));
    }
    if let Some(city) = profile.location.as_deref().filter(|c| !c.is_empty()) {
        card.push_str(&format!("\nCity: {city}"));
    }
    card
}

/// Sent to the requested listing's owner when a proposal arrives.
pub fn proposal_received(owner: &UserProfile, message: &str, link: &str) -> OutgoingEmail {
    OutgoingEmail::plain(
        owner.email.clone(),
        "New Swap Request",
        format!(
            "Hello {},\n{message}.\nView the listing: {link}\nLog in to accept or decline the request.",
            owner.first_name
        ),
    )
}

/// Confirmation to the accepting owner, repeating the contact details that
/// were shared with the requester.
pub fn accept_confirmation(
    owner: &UserProfile,
    requester: &UserProfile,
    listing_title: &str,
) -> OutgoingEmail {
    OutgoingEmail::plain(
        owner.email.clone(),
        "Swap Request Accepted",
        format!(
            "Hello {},\nYou accepted {}'s swap request for '{listing_title}'.\n\
             These contact details were shared so you can arrange the exchange:\n{}",
            owner.first_name,
            requester.display_name(),
            contact_card(owner)
        ),
    )
}

/// Sent to the requester with the accepting owner's contact card.
pub fn accept_notice(
    requester: &UserProfile,
    accepter: &UserProfile,
    listing_title: &str,
) -> OutgoingEmail {
    OutgoingEmail::plain(
        requester.email.clone(),
        "Your Swap Request Was Accepted",
        format!(
            "Hello {},\n{} accepted your swap request for '{listing_title}'.\n\
             Contact them to arrange the exchange:\n{}",
            requester.first_name,
            accepter.display_name(),
            contact_card(accepter)
        ),
    )
}

/// Sent to the other participant when a proposal is declined or withdrawn.
pub fn proposal_closed(
    recipient: &UserProfile,
    actor: &UserProfile,
    listing_title: &str,
) -> OutgoingEmail {
    OutgoingEmail::plain(
        recipient.email.clone(),
        "Swap Request Declined",
        format!(
            "Hello {},\n{} closed the swap request for '{listing_title}'.\nNo listings were exchanged.",
            recipient.first_name,
            actor.display_name()
        ),
    )
}
