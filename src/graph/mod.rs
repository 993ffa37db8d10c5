//! Graph model.
//!
//! An immutable weighted edge list plus the fixed terminal set. Both are
//! supplied once and shared read-only by every search over them.

mod edge;
mod model;
mod terminals;

pub use edge::{Edge, NodeId};
pub use model::Graph;
pub use terminals::Terminals;
