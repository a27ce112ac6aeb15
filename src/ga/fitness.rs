//! Fitness scoring.
//!
//! Fitness is engineered so that sorting descending by fitness equals
//! sorting by `(path length descending, cost ascending)`, with an
//! optional additive profit term. Because every individual's `cost` is
//! kept strictly below `max_cost`, multiplying the length/profit term by
//! `max_cost` guarantees that any increase in path length (or profit)
//! outweighs any cost difference within the admissible range.

use crate::distance::ProfitVector;

use super::individual::Individual;

/// Computes `fitness_i` for a single individual given the problem's
/// `max_cost` and optional profit vector.
pub fn compute(individual: &Individual, max_cost: f64, profits: Option<&ProfitVector>) -> f64 {
    let len = individual.len() as f64;
    let base = match profits {
        Some(w) => w.sum_over(individual.path()) + len,
        None => len,
    };
    base * max_cost - individual.cost()
}
