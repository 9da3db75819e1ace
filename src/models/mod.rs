//! Data models for the presence tracker.
//!
//! Field names serialize in camelCase to match the web client.

mod datastore;
mod member;
mod presence;
mod summary;

pub use datastore::*;
pub use member::*;
pub use presence::*;
pub use summary::*;
