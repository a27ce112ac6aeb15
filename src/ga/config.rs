//! Solver configuration.

use crate::distance::{DistanceMatrix, ProfitVector};
use crate::error::ConfigError;

/// Tunable knobs for [`crate::ga::GaSolver`], constant for one solve.
///
/// Defaults: a population of 1000, a (nominally) tournament-5 selection,
/// 5-200 generations, a 1% convergence threshold, and a 10 second
/// wall-clock budget.
///
/// # Examples
///
/// ```
/// use stsp_ga::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_max_generations(50)
///     .with_seed(42);
/// assert_eq!(config.population_size, 200);
/// ```
#[derive(Debug, Clone)]
pub struct GaConfig {
    /// Number of individuals held in the population at every generation
    /// boundary.
    pub population_size: usize,

    /// Retained for API familiarity; the tournament selection operator
    /// hard-codes a sample size of 10 regardless of this value. This is
    /// a pinned observable of the original solver, not an oversight to
    /// "fix" — changing it would change which tours the solver finds.
    pub tournament_size: usize,

    /// Minimum number of generations before the convergence check is
    /// allowed to fire.
    pub min_generations: usize,

    /// Hard cap on generations, and the length of the best-individual
    /// log.
    pub max_generations: usize,

    /// Convergence threshold, a fraction of `max_cost`.
    pub termination_threshold: f64,

    /// Wall-clock budget in milliseconds.
    pub max_runtime_ms: u64,

    /// Seed for the injected RNG. `None` draws a seed from OS entropy,
    /// which is the right default for production use; tests should
    /// always set this for reproducibility.
    pub seed: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 1000,
            tournament_size: 5,
            min_generations: 5,
            max_generations: 200,
            termination_threshold: 0.01,
            max_runtime_ms: 10_000,
            seed: None,
        }
    }
}

impl GaConfig {
    /// Sets [`Self::population_size`].
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    /// Sets [`Self::tournament_size`]. Has no effect on the selection
    /// operator's behavior — see the field's documentation.
    pub fn with_tournament_size(mut self, tournament_size: usize) -> Self {
        self.tournament_size = tournament_size;
        self
    }

    /// Sets [`Self::min_generations`].
    pub fn with_min_generations(mut self, min_generations: usize) -> Self {
        self.min_generations = min_generations;
        self
    }

    /// Sets [`Self::max_generations`].
    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = max_generations;
        self
    }

    /// Sets [`Self::termination_threshold`].
    pub fn with_termination_threshold(mut self, termination_threshold: f64) -> Self {
        self.termination_threshold = termination_threshold;
        self
    }

    /// Sets [`Self::max_runtime_ms`].
    pub fn with_max_runtime_ms(mut self, max_runtime_ms: u64) -> Self {
        self.max_runtime_ms = max_runtime_ms;
        self
    }

    /// Sets [`Self::seed`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the preconditions that make a configuration unusable: a
    /// too-small population, a profit vector of the wrong length, a
    /// negative `max_cost`, or `start`/`end` outside the matrix.
    pub fn validate(
        &self,
        start: usize,
        end: usize,
        max_cost: f64,
        distances: &DistanceMatrix,
        profits: Option<&ProfitVector>,
    ) -> Result<(), ConfigError> {
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall {
                got: self.population_size,
            });
        }
        if !max_cost.is_finite() || max_cost < 0.0 {
            return Err(ConfigError::NegativeMaxCost { max_cost });
        }
        let n = distances.size();
        if start >= n {
            return Err(ConfigError::IndexOutOfBounds { index: start, size: n });
        }
        if end >= n {
            return Err(ConfigError::IndexOutOfBounds { index: end, size: n });
        }
        if let Some(w) = profits {
            if w.len() != n {
                return Err(ConfigError::ProfitLengthMismatch {
                    expected: n,
                    got: w.len(),
                });
            }
        }
        Ok(())
    }
}
