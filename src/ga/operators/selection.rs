//! Tournament selection.

use rand::Rng;

use crate::distance::ProfitVector;
use crate::ga::fitness;
use crate::ga::individual::Individual;
use crate::ga::population::{BestLog, Population};

/// Fixed tournament sample size used by [`select`], independent of
/// [`crate::ga::GaConfig::tournament_size`].
const TOURNAMENT_SAMPLE: usize = 10;

/// Recomputes fitness across the whole population, records the
/// generation's fittest individual into `best_log[generation]`, then
/// replaces the population with one tournament winner per slot.
///
/// Each of the `P` output slots is filled by sampling `TOURNAMENT_SAMPLE`
/// indices uniformly at random (with replacement) and copying the
/// fittest of those into the slot — the population size is unchanged.
pub fn select<R: Rng>(
    population: &mut Population,
    best_log: &mut BestLog,
    generation: usize,
    max_cost: f64,
    profits: Option<&ProfitVector>,
    rng: &mut R,
) {
    for ind in population.individuals_mut() {
        let f = fitness::compute(ind, max_cost, profits);
        ind.set_fitness(f);
    }

    let fittest = population
        .individuals()
        .iter()
        .max_by(|a, b| {
            a.fitness()
                .partial_cmp(&b.fitness())
                .expect("fitness should not be NaN")
        })
        .expect("population must not be empty")
        .clone();
    best_log.record(generation, fittest);

    let n = population.len();
    let mut offspring: Vec<Individual> = Vec::with_capacity(n);
    for _ in 0..n {
        let mut best: Option<&Individual> = None;
        for _ in 0..TOURNAMENT_SAMPLE {
            let idx = rng.random_range(0..n);
            let candidate = &population.individuals()[idx];
            best = match best {
                Some(b) if b.fitness() >= candidate.fitness() => Some(b),
                _ => Some(candidate),
            };
        }
        offspring.push(best.unwrap().clone());
    }
    population.replace(offspring);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn pop_of(paths: Vec<Vec<usize>>, dm: &DistanceMatrix) -> Population {
        Population::from_individuals(
            paths.into_iter().map(|p| Individual::new(p, dm)).collect(),
        )
    }

    #[test]
    fn population_size_is_preserved() {
        let dm = DistanceMatrix::from_data(3, vec![0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0])
            .unwrap();
        let mut pop = pop_of(
            vec![vec![0, 1], vec![0, 2, 1], vec![0, 1], vec![0, 2, 1]],
            &dm,
        );
        let mut log = BestLog::new(10);
        let mut rng = StdRng::seed_from_u64(7);
        select(&mut pop, &mut log, 0, 100.0, None, &mut rng);
        assert_eq!(pop.len(), 4);
    }

    #[test]
    fn best_log_records_the_fittest_individual() {
        let dm = DistanceMatrix::from_data(3, vec![0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 0.0])
            .unwrap();
        let mut pop = pop_of(vec![vec![0, 1], vec![0, 2, 1]], &dm);
        let mut log = BestLog::new(10);
        let mut rng = StdRng::seed_from_u64(1);
        select(&mut pop, &mut log, 0, 100.0, None, &mut rng);
        // The longer path has strictly higher fitness at equal-ish cost.
        assert_eq!(log.get(0).unwrap().len(), 3);
    }
}
