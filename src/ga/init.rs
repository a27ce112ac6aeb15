//! Population initializers.

use rand::Rng;

use crate::distance::DistanceMatrix;

use super::individual::Individual;
use super::population::Population;

/// Builds the initial population for a closed tour (`start == end`):
/// for each individual, grow an outbound random walk until the
/// remaining half-budget is exhausted, then return along the same
/// points in reverse.
pub fn init_population_loop<R: Rng>(
    start: usize,
    population_size: usize,
    max_cost: f64,
    distances: &DistanceMatrix,
    rng: &mut R,
) -> Population {
    let max_init_cost = 0.5 * max_cost;
    let n = distances.size();

    let individuals = (0..population_size)
        .map(|_| {
            let mut outbound = vec![start];
            let mut accumulated = 0.0;
            let mut current = start;

            loop {
                let candidates: Vec<usize> = (0..n)
                    .filter(|&j| {
                        j != current && distances.get(current, j) < max_init_cost - accumulated
                    })
                    .collect();
                if candidates.is_empty() {
                    break;
                }
                let next = candidates[rng.random_range(0..candidates.len())];
                accumulated += distances.get(current, next);
                outbound.push(next);
                current = next;
            }

            // A degenerate outbound of just `[start]` yields `[start, start]`
            // (cost 0) rather than a single-point path.
            let path = if outbound.len() > 1 {
                let mut path = outbound.clone();
                path.extend(outbound.iter().rev().skip(1));
                path
            } else {
                vec![start, start]
            };
            Individual::with_cost(path, 2.0 * accumulated)
        })
        .collect();

    Population::from_individuals(individuals)
}

/// Builds the initial population for an open tour (`start != end`).
///
/// The `⌈P/2⌉` individuals in `[0, first_half)` grow forward from
/// `start` toward `end`; the remaining individuals grow forward from
/// `end` toward `start` and are reversed before being stored.
pub fn init_population_tour<R: Rng>(
    start: usize,
    end: usize,
    population_size: usize,
    max_cost: f64,
    distances: &DistanceMatrix,
    rng: &mut R,
) -> Population {
    let first_half = (population_size + 1) / 2;

    let individuals = (0..population_size)
        .map(|i| {
            let (from, to, reverse) = if i < first_half {
                (start, end, false)
            } else {
                (end, start, true)
            };
            let mut path = grow_tour(from, to, max_cost, distances, rng);
            if reverse {
                path.reverse();
            }
            Individual::new(path, distances)
        })
        .collect();

    Population::from_individuals(individuals)
}

/// Grows a single tour from `from` to `to`: repeatedly pick a uniformly
/// random candidate whose addition, plus the direct hop to `to`, still
/// fits the remaining budget; stop and append `to` once no candidate
/// remains.
fn grow_tour<R: Rng>(
    from: usize,
    to: usize,
    max_cost: f64,
    distances: &DistanceMatrix,
    rng: &mut R,
) -> Vec<usize> {
    let n = distances.size();
    let mut path = vec![from];
    let mut accumulated = 0.0;
    let mut current = from;

    loop {
        let remaining = max_cost - accumulated;
        let candidates: Vec<usize> = (0..n)
            .filter(|&j| {
                j != to
                    && j != current
                    && distances.get(current, j) + distances.get(to, j) <= remaining
            })
            .collect();

        if candidates.is_empty() {
            accumulated += distances.get(current, to);
            path.push(to);
            break;
        }

        let next = candidates[rng.random_range(0..candidates.len())];
        accumulated += distances.get(current, next);
        path.push(next);
        current = next;
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn full_dm(n: usize, d: f64) -> DistanceMatrix {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    data[i * n + j] = d;
                }
            }
        }
        DistanceMatrix::from_data(n, data).unwrap()
    }

    #[test]
    fn loop_population_all_start_and_end_at_start() {
        let dm = full_dm(10, 10.0);
        let mut rng = StdRng::seed_from_u64(42);
        let pop = init_population_loop(0, 50, 100.0, &dm, &mut rng);
        assert_eq!(pop.len(), 50);
        for ind in pop.individuals() {
            assert_eq!(ind.path()[0], 0);
            assert_eq!(*ind.path().last().unwrap(), 0);
            assert!(ind.cost() < 100.0);
        }
    }

    #[test]
    fn loop_population_degenerate_outbound_is_single_pair() {
        // max_cost so tiny that no candidate can ever be added.
        let dm = full_dm(5, 10.0);
        let mut rng = StdRng::seed_from_u64(1);
        let pop = init_population_loop(0, 5, 1.0, &dm, &mut rng);
        for ind in pop.individuals() {
            assert_eq!(ind.path(), &[0, 0]);
            assert_eq!(ind.cost(), 0.0);
        }
    }

    #[test]
    fn tour_population_all_start_and_end_correctly() {
        let dm = full_dm(10, 10.0);
        let mut rng = StdRng::seed_from_u64(7);
        let pop = init_population_tour(0, 1, 40, 100.0, &dm, &mut rng);
        assert_eq!(pop.len(), 40);
        for ind in pop.individuals() {
            assert_eq!(ind.path()[0], 0);
            assert_eq!(*ind.path().last().unwrap(), 1);
            assert!(ind.cost() < 100.0);
        }
    }

    #[test]
    fn tour_growth_uses_end_row_not_end_column_for_asymmetric_matrices() {
        // 4 locations: 0 = start, 3 = end. Location 1 is only admissible
        // under the correct criterion (spec.md §4.2: `D[current,j] +
        // D[end,j]`, i.e. end's own row). If `grow_tour` instead used
        // `D[j, end]` (the column into `end`), location 1 would look too
        // expensive and would never be reachable.
        let mut data = vec![1000.0; 16];
        for i in 0..4 {
            data[i * 4 + i] = 0.0;
        }
        data[0 * 4 + 3] = 5.0; // D(0,3): direct start->end hop
        data[0 * 4 + 1] = 1.0; // D(0,1): cheap to reach location 1
        data[3 * 4 + 1] = 2.0; // D(3,1): end's row to 1 is cheap (correct criterion)
        data[1 * 4 + 3] = 100.0; // D(1,3): column into end is expensive (buggy criterion)
        let dm = DistanceMatrix::from_data(4, data).unwrap();

        let mut rng = StdRng::seed_from_u64(0);
        let pop = init_population_tour(0, 3, 20, 10.0, &dm, &mut rng);
        // first_half = ceil(20/2) = 10 individuals build forward from start.
        assert!(
            pop.individuals()[..10]
                .iter()
                .any(|ind| ind.path().contains(&1)),
            "location 1 should be reachable when the candidate filter uses D[end, j]"
        );
    }

    #[test]
    fn tour_population_splits_half_from_each_end() {
        // Use a deterministic tiny matrix where the first hop is forced:
        // with max_cost just enough for the direct start->end hop, each
        // individual should end up as exactly [from, to] before reversal,
        // letting us check which half started where.
        let dm = full_dm(4, 5.0);
        let mut rng = StdRng::seed_from_u64(3);
        let pop = init_population_tour(0, 1, 10, 5.0, &dm, &mut rng);
        assert_eq!(pop.len(), 10);
        // ceil(10/2) = 5 individuals build forward from start.
        for ind in &pop.individuals()[..5] {
            assert_eq!(ind.path()[0], 0);
        }
        for ind in &pop.individuals()[5..] {
            assert_eq!(*ind.path().last().unwrap(), 1);
        }
    }
}
