//! Core trait for the local search loop.

use rand::Rng;

use crate::error::Result;

/// Defines a problem the search loop can optimize.
///
/// The implementor supplies construction, cost evaluation and the
/// neighbor move; the loop handles initial-solution selection,
/// acceptance and bookkeeping.
///
/// # Minimization
///
/// The loop minimizes [`cost`](LocalSearchProblem::cost).
///
/// # Examples
///
/// ```ignore
/// struct Line;
///
/// impl LocalSearchProblem for Line {
///     type Solution = i64;
///
///     fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<i64> {
///         Ok(rng.random_range(-50..50))
///     }
///
///     fn cost(&self, x: &i64) -> f64 {
///         (*x as f64).abs()
///     }
///
///     fn neighbor<R: Rng>(&self, x: &i64, rng: &mut R) -> Result<i64> {
///         Ok(x + rng.random_range(-2..=2))
///     }
/// }
/// ```
pub trait LocalSearchProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Clone + Send;

    /// Creates a random initial solution.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<Self::Solution>;

    /// Computes the cost of a solution. Lower is better.
    fn cost(&self, solution: &Self::Solution) -> f64;

    /// Generates a candidate near `solution`.
    ///
    /// Must not modify `solution`. An `Err` means this draw produced no
    /// usable candidate; the loop counts it as a non-improving iteration
    /// and moves on.
    fn neighbor<R: Rng>(
        &self,
        solution: &Self::Solution,
        rng: &mut R,
    ) -> Result<Self::Solution>;
}
