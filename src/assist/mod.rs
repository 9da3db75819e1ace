//! Language-model assisted flows.
//!
//! Meeting-day selection itself is deterministic (see [`crate::presence`]);
//! the model only writes the justification prose and the productivity report.

mod meeting;
mod prompts;
mod summary;

pub use meeting::*;
pub use summary::*;
