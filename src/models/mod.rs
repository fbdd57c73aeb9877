//! Domain types for the to-do list.
//!
//! - [`Task`]: one entry, identified by an opaque string id; insertion
//!   order is meaningful and preserved by every operation.
//! - [`Filter`]: the subset of the list the user has chosen to view,
//!   applied through the pure [`visible`] projection.

mod filter;
mod task;

pub use filter::*;
pub use task::*;
