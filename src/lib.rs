//! Randomized local search for the Steiner Tree Problem in Graphs.
//!
//! - **Graph model** ([`graph`]): immutable weighted edge list and the
//!   fixed terminal set.
//! - **Trees** ([`tree`]): candidate solutions, fitness, validity checks
//!   and trimming of dead-end relay branches.
//! - **Search** ([`search`]): a problem-agnostic local search loop with
//!   greedy or annealing acceptance.
//! - **Steiner** ([`steiner`]): random tree construction, neighbor moves
//!   and the [`SteinerEngine`](steiner::SteinerEngine) entry point.
//!
//! # Example
//!
//! ```
//! use u_steiner::search::SearchConfig;
//! use u_steiner::steiner::SteinerEngine;
//!
//! let edges: Vec<(u32, u32, f64)> = (0..10)
//!     .flat_map(|a| (a + 1..10).map(move |b| (a, b, 1.0)))
//!     .collect();
//! let engine = SteinerEngine::new(edges, [1, 3, 6, 9])
//!     .unwrap()
//!     .with_config(SearchConfig::default().with_seed(42));
//!
//! let result = engine.run().unwrap();
//! assert!(engine.is_valid(&result.best));
//! ```

pub mod error;
pub mod graph;
pub mod search;
pub mod steiner;
pub mod tree;

pub use error::{Result, SteinerError};
