//! Steiner Tree Problem in Graphs.
//!
//! Given a weighted undirected graph and a set of terminal nodes, find a
//! cheap tree connecting all terminals, optionally routing through
//! non-terminal relay nodes. The problem is NP-hard; this module
//! approximates it with randomized local search:
//!
//! 1. Grow a few random trees from the first terminal, trim dead-end
//!    relay branches, keep the cheapest.
//! 2. Repeatedly apply a random move (bridge insertion or relay bypass),
//!    trim, and keep the candidate if the acceptance rule allows.
//!
//! No optimality guarantee is given.

mod builder;
mod engine;
mod neighbor;
mod problem;

pub use builder::build_initial_tree;
pub use engine::{SteinerEngine, SteinerResult};
pub use neighbor::{bypass_relay, insert_bridge, perturb};
pub use problem::SteinerProblem;
