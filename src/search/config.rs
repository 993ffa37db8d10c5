//! Search configuration, acceptance rules and cooling schedules.

/// Cooling schedule for temperature reduction under [`Acceptance::Annealing`].
///
/// # References
///
/// - Geometric: standard textbook approach
/// - Linear: fixed-duration cooling
/// - LundyMees: Lundy & Mees (1986), with convergence proof
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CoolingSchedule {
    /// Geometric (exponential) cooling: `T_{k+1} = alpha * T_k`.
    ///
    /// Typical `alpha`: 0.95 to 0.99.
    Geometric {
        /// Cooling factor in (0, 1). Higher = slower cooling.
        alpha: f64,
    },

    /// Linear cooling from the initial to the minimum temperature over
    /// the whole iteration budget.
    Linear,

    /// Lundy-Mees cooling: `T_{k+1} = T_k / (1 + beta * T_k)`.
    ///
    /// Reference: Lundy & Mees (1986)
    LundyMees {
        /// Cooling parameter. Typically `(T_0 - T_min) / (max_iter * T_0 * T_min)`.
        beta: f64,
    },
}

impl Default for CoolingSchedule {
    fn default() -> Self {
        CoolingSchedule::Geometric { alpha: 0.95 }
    }
}

/// Rule deciding whether a candidate replaces the current solution.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Acceptance {
    /// Strict hill climbing: only candidates with strictly lower cost are
    /// accepted. Worse or equal candidates are always discarded.
    #[default]
    Greedy,

    /// Metropolis criterion: worse candidates are accepted with
    /// probability `exp(-delta / T)`; `T` follows the cooling schedule and
    /// never drops below `min_temperature`.
    Annealing {
        initial_temperature: f64,
        min_temperature: f64,
        cooling: CoolingSchedule,
        /// Iterations spent at each temperature level.
        iterations_per_temperature: usize,
    },
}

impl Acceptance {
    /// Annealing with the default geometric schedule.
    pub fn annealing(initial_temperature: f64) -> Self {
        Acceptance::Annealing {
            initial_temperature,
            min_temperature: 1e-6,
            cooling: CoolingSchedule::default(),
            iterations_per_temperature: 10,
        }
    }
}

/// Configuration for a local search run.
///
/// # Examples
///
/// ```
/// use u_steiner::search::{Acceptance, SearchConfig};
///
/// let config = SearchConfig::default()
///     .with_max_iterations(1000)
///     .with_initial_trees(5)
///     .with_acceptance(Acceptance::annealing(2.0))
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Number of perturbation steps. The search is done when the
    /// iteration counter reaches this value.
    pub max_iterations: usize,

    /// Number of randomly grown trees the best starting tree is picked from.
    pub initial_trees: usize,

    /// Acceptance rule for candidates.
    pub acceptance: Acceptance,

    /// Random seed for reproducibility. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            initial_trees: 3,
            acceptance: Acceptance::Greedy,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_initial_trees(mut self, n: usize) -> Self {
        self.initial_trees = n;
        self
    }

    pub fn with_acceptance(mut self, acceptance: Acceptance) -> Self {
        self.acceptance = acceptance;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_trees == 0 {
            return Err("initial_trees must be at least 1".into());
        }
        if let Acceptance::Annealing {
            initial_temperature,
            min_temperature,
            cooling,
            iterations_per_temperature,
        } = self.acceptance
        {
            if initial_temperature <= 0.0 {
                return Err("initial_temperature must be positive".into());
            }
            if min_temperature <= 0.0 {
                return Err("min_temperature must be positive".into());
            }
            if min_temperature >= initial_temperature {
                return Err("min_temperature must be less than initial_temperature".into());
            }
            if iterations_per_temperature == 0 {
                return Err("iterations_per_temperature must be at least 1".into());
            }
            match cooling {
                CoolingSchedule::Geometric { alpha } => {
                    if alpha <= 0.0 || alpha >= 1.0 {
                        return Err(format!("geometric alpha must be in (0, 1), got {alpha}"));
                    }
                }
                CoolingSchedule::LundyMees { beta } => {
                    if beta <= 0.0 {
                        return Err(format!("lundy-mees beta must be positive, got {beta}"));
                    }
                }
                CoolingSchedule::Linear => {}
            }
        }
        Ok(())
    }
}
