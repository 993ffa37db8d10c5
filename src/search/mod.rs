//! Randomized local search.
//!
//! A single-solution trajectory search: build a few random starting
//! solutions, keep the cheapest, then repeatedly draw a neighbor and
//! decide whether to move to it. The default acceptance rule is strict
//! hill climbing; an annealing rule with a Metropolis criterion and
//! configurable cooling is available as an alternative.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Lundy & Mees (1986), "Convergence of an Annealing Algorithm"

mod config;
mod runner;
mod types;

pub use config::{Acceptance, CoolingSchedule, SearchConfig};
pub use runner::{Phase, Search, SearchResult, SearchRunner, StepOutcome};
pub use types::LocalSearchProblem;
