//! Candidate trees: representation, fitness, validity and trimming.

mod trim;
mod types;
mod validate;

pub use trim::trim;
pub use types::{fitness, Tree};
pub use validate::{has_cycle, has_unused_terminals, is_connected, is_valid};
