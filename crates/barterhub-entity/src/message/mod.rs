//! Swap chat entities.

pub mod conversation;
pub mod model;

pub use conversation::Conversation;
pub use model::{Message, NewMessage, ThreadMessage};
