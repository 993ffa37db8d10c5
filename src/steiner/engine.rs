//! Public entry point: build once, run searches.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use log::warn;
use rand::Rng;

use super::problem::SteinerProblem;
use crate::error::{Result, SteinerError};
use crate::graph::{Edge, NodeId};
use crate::search::{SearchConfig, SearchResult, SearchRunner};
use crate::tree::Tree;

/// Outcome of a Steiner search: `best` is the tree, `best_cost` its weight.
pub type SteinerResult<N> = SearchResult<Tree<N>>;

/// Approximates minimum Steiner trees by randomized local search.
///
/// The engine owns an immutable [`SteinerProblem`] and a
/// [`SearchConfig`]. Every `run*` call is an independent search with its
/// own random state; the engine itself is never mutated by a run.
///
/// # Examples
///
/// ```
/// use u_steiner::search::SearchConfig;
/// use u_steiner::steiner::SteinerEngine;
///
/// let edges = [(0, 1, 1.0), (1, 2, 1.0), (0, 2, 5.0), (2, 3, 1.0)];
/// let engine = SteinerEngine::new(edges, [0, 3])
///     .unwrap()
///     .with_config(SearchConfig::default().with_max_iterations(200).with_seed(42));
///
/// let result = engine.run().unwrap();
/// assert!(engine.is_valid(&result.best));
/// assert_eq!(result.best_cost, 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct SteinerEngine<N: NodeId> {
    problem: SteinerProblem<N>,
    config: SearchConfig,
}

impl<N: NodeId> SteinerEngine<N> {
    /// Builds an engine with the default configuration.
    ///
    /// # Errors
    ///
    /// See [`SteinerProblem::new`].
    pub fn new<I, E, T>(edges: I, terminals: T) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<N>>,
        T: IntoIterator<Item = N>,
    {
        Ok(Self::from_problem(SteinerProblem::new(edges, terminals)?))
    }

    pub fn from_problem(problem: SteinerProblem<N>) -> Self {
        Self {
            problem,
            config: SearchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: SearchConfig) -> Self {
        self.config = config;
        self
    }

    /// # Errors
    ///
    /// [`SteinerError::InvalidConfig`] unless `p` lies in `[0, 1]`.
    pub fn with_bypass_probability(mut self, p: f64) -> Result<Self> {
        self.problem = self.problem.with_bypass_probability(p)?;
        Ok(self)
    }

    pub fn problem(&self) -> &SteinerProblem<N> {
        &self.problem
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs the full initialize-and-search loop.
    ///
    /// Seeded from `config.seed` when set, from fresh entropy otherwise.
    pub fn run(&self) -> Result<SteinerResult<N>> {
        SearchRunner::run(&self.problem, &self.config)
    }

    /// Runs with a caller-owned random source; `config.seed` is ignored.
    pub fn run_with_rng<R: Rng>(&self, rng: R) -> Result<SteinerResult<N>> {
        SearchRunner::run_with_rng(&self.problem, &self.config, rng, None)
    }

    /// Runs until done or until `cancel` is set.
    pub fn run_with_cancel(&self, cancel: Arc<AtomicBool>) -> Result<SteinerResult<N>> {
        SearchRunner::run_with_cancel(&self.problem, &self.config, Some(cancel))
    }

    /// Runs `runs` independent searches and returns the cheapest result.
    ///
    /// Run `i` is seeded with `seed + i`, where `seed` is `config.seed` or
    /// a fresh random value. With the `parallel` feature the runs execute
    /// on the rayon thread pool; each run is still a single sequential
    /// search.
    ///
    /// # Errors
    ///
    /// [`SteinerError::InvalidConfig`] when `runs` is zero; the first run
    /// error when every run fails.
    pub fn run_portfolio(&self, runs: usize) -> Result<SteinerResult<N>> {
        if runs == 0 {
            return Err(SteinerError::InvalidConfig(
                "portfolio needs at least one run".into(),
            ));
        }
        let base = self.config.seed.unwrap_or_else(rand::random);
        let configs: Vec<SearchConfig> = (0..runs as u64)
            .map(|i| self.config.clone().with_seed(base.wrapping_add(i)))
            .collect();

        #[cfg(feature = "parallel")]
        let outcomes: Vec<Result<SteinerResult<N>>> = {
            use rayon::prelude::*;
            configs
                .par_iter()
                .map(|config| SearchRunner::run(&self.problem, config))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let outcomes: Vec<Result<SteinerResult<N>>> = configs
            .iter()
            .map(|config| SearchRunner::run(&self.problem, config))
            .collect();

        let mut best: Option<SteinerResult<N>> = None;
        let mut first_error = None;
        for (i, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(result) => {
                    if best.as_ref().is_none_or(|b| result.best_cost < b.best_cost) {
                        best = Some(result);
                    }
                }
                Err(err) => {
                    warn!("portfolio run {i} failed: {err}");
                    first_error.get_or_insert(err);
                }
            }
        }

        match (best, first_error) {
            (Some(result), _) => Ok(result),
            (None, Some(err)) => Err(err),
            (None, None) => Err(SteinerError::InvariantViolation("portfolio produced no outcome")),
        }
    }

    pub fn is_valid(&self, tree: &Tree<N>) -> bool {
        self.problem.is_valid(tree)
    }

    pub fn has_cycle(&self, tree: &Tree<N>) -> bool {
        self.problem.has_cycle(tree)
    }

    pub fn has_unused_terminals(&self, tree: &Tree<N>) -> bool {
        self.problem.has_unused_terminals(tree)
    }

    pub fn build_initial_tree<R: Rng>(&self, rng: &mut R) -> Result<Tree<N>> {
        self.problem.build_initial_tree(rng)
    }

    pub fn trim(&self, tree: &Tree<N>) -> Tree<N> {
        self.problem.trim(tree)
    }

    pub fn perturb<R: Rng>(&self, tree: &Tree<N>, rng: &mut R) -> Result<Tree<N>> {
        self.problem.perturb(tree, rng)
    }

    pub fn fitness(&self, tree: &Tree<N>) -> f64 {
        self.problem.fitness(tree)
    }
}
