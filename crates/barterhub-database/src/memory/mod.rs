//! In-memory store used for local runs and tests.

pub mod store;

pub use store::MemoryStore;
