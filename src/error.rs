//! Configuration precondition errors.
//!
//! These are programmer errors, not runtime failures: callers are
//! expected to validate once at construction time and never see these
//! in steady-state operation.

use thiserror::Error;

/// A precondition violation detected before a solve begins.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// Population size must be at least 2 (selection and crossover both
    /// need at least a pair of individuals to operate over).
    #[error("population_size must be >= 2, got {got}")]
    PopulationTooSmall { got: usize },

    /// The profit vector, when present, must cover every location.
    #[error("profit vector length {got} does not match matrix size {expected}")]
    ProfitLengthMismatch { expected: usize, got: usize },

    /// Travel costs and budgets are never negative.
    #[error("max_cost must be non-negative, got {max_cost}")]
    NegativeMaxCost { max_cost: f64 },

    /// `start`/`end` must be valid indices into the distance matrix.
    #[error("location index {index} out of bounds for matrix of size {size}")]
    IndexOutOfBounds { index: usize, size: usize },
}
