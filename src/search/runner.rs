//! Search execution loop.
//!
//! # Algorithm
//!
//! 1. Build `initial_trees` random solutions, keep the cheapest
//! 2. At each iteration:
//!    a. Generate a neighbor of the current solution
//!    b. Accept it according to the [`Acceptance`] rule
//!    c. Update the best-so-far solution if improved
//! 3. Terminate when the iteration counter reaches `max_iterations`
//!    (or on external cancellation)
//!
//! The loop is an explicit state machine ([`Phase`]) so that callers can
//! drive it step by step; [`SearchRunner`] drives it to completion.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::{Acceptance, CoolingSchedule, SearchConfig};
use super::types::LocalSearchProblem;
use crate::error::{Result, SteinerError};

/// Result of a search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Number of iterations executed (neighbor draws).
    pub iterations: usize,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of moves strictly better than the solution they came from.
    pub improving_moves: usize,

    /// Number of neighbor draws that produced no candidate.
    pub failed_moves: usize,

    /// Whether cancelled externally.
    pub cancelled: bool,

    /// Temperature when the search stopped. `None` for greedy acceptance.
    pub final_temperature: Option<f64>,

    /// Best cost before the first iteration and after every iteration.
    pub cost_history: Vec<f64>,
}

/// Lifecycle of a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No solution yet; call [`Search::initialize`].
    Uninitialized,
    /// Stepping towards the iteration limit.
    Searching,
    /// Iteration limit reached or cancelled. Terminal.
    Done,
}

/// Outcome of a single [`Search::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Candidate accepted and strictly better than the current solution.
    Improved,
    /// Worse or equal candidate accepted by the annealing criterion.
    Accepted,
    /// Candidate discarded.
    Rejected,
    /// No candidate could be generated this iteration.
    Failed,
}

/// A single sequential search over a problem.
///
/// Owns its random source and all mutable state; the problem is only
/// borrowed, so any number of searches may share one problem.
pub struct Search<'p, P: LocalSearchProblem, R: Rng> {
    problem: &'p P,
    config: SearchConfig,
    rng: R,
    phase: Phase,

    current: Option<P::Solution>,
    current_cost: f64,
    best: Option<P::Solution>,
    best_cost: f64,

    iterations: usize,
    accepted_moves: usize,
    improving_moves: usize,
    failed_moves: usize,
    cancelled: bool,

    temperature: f64,
    temperature_step: usize,
    cost_history: Vec<f64>,
}

impl<'p, P: LocalSearchProblem, R: Rng> Search<'p, P, R> {
    /// Creates an uninitialized search.
    ///
    /// # Errors
    ///
    /// [`SteinerError::InvalidConfig`] if the config fails validation.
    pub fn new(problem: &'p P, config: &SearchConfig, rng: R) -> Result<Self> {
        config.validate().map_err(SteinerError::InvalidConfig)?;

        let temperature = match config.acceptance {
            Acceptance::Greedy => 0.0,
            Acceptance::Annealing {
                initial_temperature,
                ..
            } => initial_temperature,
        };

        Ok(Self {
            problem,
            config: config.clone(),
            rng,
            phase: Phase::Uninitialized,
            current: None,
            current_cost: f64::INFINITY,
            best: None,
            best_cost: f64::INFINITY,
            iterations: 0,
            accepted_moves: 0,
            improving_moves: 0,
            failed_moves: 0,
            cancelled: false,
            temperature,
            temperature_step: 0,
            cost_history: Vec::with_capacity(config.max_iterations + 1),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// The best solution so far, once initialized.
    pub fn best(&self) -> Option<&P::Solution> {
        self.best.as_ref()
    }

    /// Cost of the best solution so far (`INFINITY` before initialization).
    pub fn best_cost(&self) -> f64 {
        self.best_cost
    }

    /// Builds the initial candidates and keeps the cheapest.
    ///
    /// Moves `Uninitialized -> Searching` (or straight to `Done` when the
    /// iteration budget is zero). Calling it again restarts the search.
    ///
    /// # Errors
    ///
    /// Propagates construction failures from the problem.
    pub fn initialize(&mut self) -> Result<()> {
        let mut chosen: Option<(P::Solution, f64)> = None;

        for i in 0..self.config.initial_trees {
            let candidate = self.problem.initial_solution(&mut self.rng)?;
            let cost = self.problem.cost(&candidate);
            debug!("initial candidate {i}: cost {cost}");
            if chosen.as_ref().is_none_or(|(_, best)| cost < *best) {
                chosen = Some((candidate, cost));
            }
        }

        let (solution, cost) =
            chosen.ok_or(SteinerError::InvariantViolation("no initial candidate built"))?;

        self.current = Some(solution.clone());
        self.current_cost = cost;
        self.best = Some(solution);
        self.best_cost = cost;

        self.iterations = 0;
        self.accepted_moves = 0;
        self.improving_moves = 0;
        self.failed_moves = 0;
        self.cancelled = false;
        self.temperature_step = 0;
        if let Acceptance::Annealing {
            initial_temperature,
            ..
        } = self.config.acceptance
        {
            self.temperature = initial_temperature;
        }
        self.cost_history.clear();
        self.cost_history.push(cost);

        self.phase = if self.config.max_iterations == 0 {
            Phase::Done
        } else {
            Phase::Searching
        };
        debug!("search initialized with cost {cost}");
        Ok(())
    }

    /// Runs one iteration. Returns `None` unless the search is `Searching`.
    pub fn step(&mut self) -> Option<StepOutcome> {
        if self.phase != Phase::Searching {
            return None;
        }
        let current = self.current.as_ref()?;

        let outcome = match self.problem.neighbor(current, &mut self.rng) {
            Err(err) => {
                trace!("iteration {}: no candidate ({err})", self.iterations);
                self.failed_moves += 1;
                StepOutcome::Failed
            }
            Ok(candidate) => {
                let candidate_cost = self.problem.cost(&candidate);
                let delta = candidate_cost - self.current_cost;

                let outcome = if delta < 0.0 {
                    StepOutcome::Improved
                } else if self.metropolis_accepts(delta) {
                    StepOutcome::Accepted
                } else {
                    StepOutcome::Rejected
                };

                if outcome != StepOutcome::Rejected {
                    self.accepted_moves += 1;
                    if outcome == StepOutcome::Improved {
                        self.improving_moves += 1;
                    }
                    if candidate_cost < self.best_cost {
                        debug!(
                            "iteration {}: best cost {} -> {}",
                            self.iterations, self.best_cost, candidate_cost
                        );
                        self.best = Some(candidate.clone());
                        self.best_cost = candidate_cost;
                    }
                    self.current = Some(candidate);
                    self.current_cost = candidate_cost;
                }
                outcome
            }
        };

        self.iterations += 1;
        self.cost_history.push(self.best_cost);
        self.cool();

        if self.iterations >= self.config.max_iterations {
            self.phase = Phase::Done;
        }
        Some(outcome)
    }

    /// Stops the search early. The best solution so far is kept.
    pub fn cancel(&mut self) {
        if self.phase != Phase::Done {
            self.cancelled = true;
            self.phase = Phase::Done;
        }
    }

    /// Consumes the search and returns its result.
    ///
    /// `None` if the search was never initialized.
    pub fn finish(self) -> Option<SearchResult<P::Solution>> {
        let best = self.best?;
        let final_temperature = match self.config.acceptance {
            Acceptance::Greedy => None,
            Acceptance::Annealing { .. } => Some(self.temperature),
        };
        Some(SearchResult {
            best,
            best_cost: self.best_cost,
            iterations: self.iterations,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            failed_moves: self.failed_moves,
            cancelled: self.cancelled,
            final_temperature,
            cost_history: self.cost_history,
        })
    }

    fn metropolis_accepts(&mut self, delta: f64) -> bool {
        match self.config.acceptance {
            Acceptance::Greedy => false,
            Acceptance::Annealing { .. } if self.temperature > 0.0 => {
                let probability = (-delta / self.temperature).exp();
                self.rng.random_range(0.0..1.0) < probability
            }
            Acceptance::Annealing { .. } => false,
        }
    }

    /// Advances the temperature once per temperature level.
    fn cool(&mut self) {
        let Acceptance::Annealing {
            initial_temperature,
            min_temperature,
            cooling,
            iterations_per_temperature,
        } = self.config.acceptance
        else {
            return;
        };

        let per_level = match cooling {
            CoolingSchedule::LundyMees { .. } => 1,
            _ => iterations_per_temperature,
        };
        if !self.iterations.is_multiple_of(per_level) {
            return;
        }

        let next = match cooling {
            CoolingSchedule::Geometric { alpha } => self.temperature * alpha,
            CoolingSchedule::Linear => {
                let levels = (self.config.max_iterations / per_level).max(1);
                initial_temperature
                    - (self.temperature_step + 1) as f64 * (initial_temperature - min_temperature)
                        / levels as f64
            }
            CoolingSchedule::LundyMees { beta } => {
                self.temperature / (1.0 + beta * self.temperature)
            }
        };
        self.temperature = next.max(min_temperature);
        self.temperature_step += 1;
    }
}

/// Drives a [`Search`] to completion.
pub struct SearchRunner;

impl SearchRunner {
    /// Runs a search with a generator seeded from `config.seed`.
    pub fn run<P: LocalSearchProblem>(
        problem: &P,
        config: &SearchConfig,
    ) -> Result<SearchResult<P::Solution>> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs a search with an optional cancellation token.
    pub fn run_with_cancel<P: LocalSearchProblem>(
        problem: &P,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult<P::Solution>> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::run_with_rng(problem, config, rng, cancel)
    }

    /// Runs a search with a caller-owned random source.
    ///
    /// # Errors
    ///
    /// Invalid configuration or a failed initial construction. Failed
    /// neighbor draws are not errors; they are counted in
    /// [`SearchResult::failed_moves`].
    pub fn run_with_rng<P: LocalSearchProblem, R: Rng>(
        problem: &P,
        config: &SearchConfig,
        rng: R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult<P::Solution>> {
        let mut search = Search::new(problem, config, rng)?;
        search.initialize()?;
        info!(
            "search started: cost {}, {} iterations",
            search.best_cost(),
            config.max_iterations
        );

        while !search.is_done() {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    search.cancel();
                    break;
                }
            }
            search.step();
        }

        let result = search
            .finish()
            .ok_or(SteinerError::InvariantViolation("search finished uninitialized"))?;
        info!(
            "search finished: cost {} after {} iterations ({} improving, {} failed)",
            result.best_cost, result.iterations, result.improving_moves, result.failed_moves
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---- Integer line: f(x) = |x - 10| ----

    struct LineProblem;

    impl LocalSearchProblem for LineProblem {
        type Solution = i64;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<i64> {
            Ok(rng.random_range(-100..100))
        }

        fn cost(&self, x: &i64) -> f64 {
            (*x - 10).abs() as f64
        }

        fn neighbor<R: Rng>(&self, x: &i64, rng: &mut R) -> Result<i64> {
            Ok(x + rng.random_range(-3..=3))
        }
    }

    struct StuckProblem;

    impl LocalSearchProblem for StuckProblem {
        type Solution = i64;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Result<i64> {
            Ok(5)
        }

        fn cost(&self, x: &i64) -> f64 {
            *x as f64
        }

        fn neighbor<R: Rng>(&self, _x: &i64, _rng: &mut R) -> Result<i64> {
            Err(SteinerError::MissingEdge {
                a: "1".into(),
                b: "2".into(),
            })
        }
    }

    struct BrokenProblem;

    impl LocalSearchProblem for BrokenProblem {
        type Solution = i64;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Result<i64> {
            Err(SteinerError::BuildExhausted { missing: 1 })
        }

        fn cost(&self, x: &i64) -> f64 {
            *x as f64
        }

        fn neighbor<R: Rng>(&self, x: &i64, _rng: &mut R) -> Result<i64> {
            Ok(*x)
        }
    }

    #[test]
    fn test_greedy_finds_optimum() {
        let config = SearchConfig::default().with_max_iterations(2000).with_seed(42);
        let result = SearchRunner::run(&LineProblem, &config).unwrap();

        assert_eq!(result.best, 10, "expected optimum at 10, got {}", result.best);
        assert_eq!(result.best_cost, 0.0);
        assert_eq!(result.iterations, 2000);
        assert!(!result.cancelled);
        assert!(result.final_temperature.is_none());
    }

    #[test]
    fn test_greedy_never_accepts_worse() {
        let config = SearchConfig::default().with_max_iterations(500).with_seed(7);
        let result = SearchRunner::run(&LineProblem, &config).unwrap();
        assert_eq!(result.accepted_moves, result.improving_moves);
    }

    #[test]
    fn test_cost_history_non_increasing() {
        let config = SearchConfig::default()
            .with_max_iterations(300)
            .with_acceptance(Acceptance::annealing(5.0))
            .with_seed(42);
        let result = SearchRunner::run(&LineProblem, &config).unwrap();

        assert_eq!(result.cost_history.len(), result.iterations + 1);
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0],
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_annealing_accepts_uphill_at_high_temperature() {
        let config = SearchConfig::default()
            .with_max_iterations(1000)
            .with_acceptance(Acceptance::Annealing {
                initial_temperature: 1e8,
                min_temperature: 1e7,
                cooling: CoolingSchedule::Geometric { alpha: 0.99 },
                iterations_per_temperature: 100,
            })
            .with_seed(42);
        let result = SearchRunner::run(&LineProblem, &config).unwrap();

        let acceptance_ratio = result.accepted_moves as f64 / result.iterations as f64;
        assert!(
            acceptance_ratio > 0.8,
            "expected high acceptance at high temp, got {acceptance_ratio}"
        );
        assert!(result.accepted_moves > result.improving_moves);
    }

    #[test]
    fn test_temperature_floors_at_minimum() {
        for cooling in [
            CoolingSchedule::Geometric { alpha: 0.5 },
            CoolingSchedule::Linear,
            CoolingSchedule::LundyMees { beta: 10.0 },
        ] {
            let config = SearchConfig::default()
                .with_max_iterations(400)
                .with_acceptance(Acceptance::Annealing {
                    initial_temperature: 10.0,
                    min_temperature: 0.5,
                    cooling,
                    iterations_per_temperature: 2,
                })
                .with_seed(1);
            let result = SearchRunner::run(&LineProblem, &config).unwrap();
            let t = result.final_temperature.unwrap();
            assert!((t - 0.5).abs() < 1e-9, "{cooling:?} ended at {t}");
        }
    }

    #[test]
    fn test_cancellation() {
        let config = SearchConfig::default().with_max_iterations(1000).with_seed(42);
        let cancel = Arc::new(AtomicBool::new(true));

        let result = SearchRunner::run_with_cancel(&LineProblem, &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_failed_neighbors_count_as_iterations() {
        let config = SearchConfig::default().with_max_iterations(25).with_seed(3);
        let result = SearchRunner::run(&StuckProblem, &config).unwrap();

        assert_eq!(result.iterations, 25);
        assert_eq!(result.failed_moves, 25);
        assert_eq!(result.best, 5);
    }

    #[test]
    fn test_initialization_failure_propagates() {
        let config = SearchConfig::default().with_seed(3);
        let err = SearchRunner::run(&BrokenProblem, &config).unwrap_err();
        assert_eq!(err, SteinerError::BuildExhausted { missing: 1 });
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SearchConfig::default().with_initial_trees(0);
        let err = SearchRunner::run(&LineProblem, &config).unwrap_err();
        assert!(matches!(err, SteinerError::InvalidConfig(_)));
    }

    #[test]
    fn test_phase_transitions() {
        let config = SearchConfig::default().with_max_iterations(3);
        let mut search = Search::new(&LineProblem, &config, StdRng::seed_from_u64(9)).unwrap();

        assert_eq!(search.phase(), Phase::Uninitialized);
        assert_eq!(search.step(), None);
        assert!(search.best().is_none());

        search.initialize().unwrap();
        assert_eq!(search.phase(), Phase::Searching);
        let start = search.best_cost();

        for _ in 0..3 {
            assert!(search.step().is_some());
        }
        assert_eq!(search.phase(), Phase::Done);
        assert_eq!(search.step(), None);
        assert!(search.best_cost() <= start);

        let result = search.finish().unwrap();
        assert_eq!(result.iterations, 3);
    }

    #[test]
    fn test_zero_iterations_done_after_initialize() {
        let config = SearchConfig::default().with_max_iterations(0);
        let mut search = Search::new(&LineProblem, &config, StdRng::seed_from_u64(9)).unwrap();
        search.initialize().unwrap();
        assert!(search.is_done());
        assert_eq!(search.finish().unwrap().cost_history.len(), 1);
    }

    #[test]
    fn test_unfinished_search_has_no_result() {
        let config = SearchConfig::default();
        let search = Search::new(&LineProblem, &config, StdRng::seed_from_u64(9)).unwrap();
        assert!(search.finish().is_none());
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = SearchConfig::default().with_max_iterations(200).with_seed(11);
        let a = SearchRunner::run(&LineProblem, &config).unwrap();
        let b = SearchRunner::run(&LineProblem, &config).unwrap();
        assert_eq!(a.best, b.best);
        assert_eq!(a.cost_history, b.cost_history);
    }
}
