//! Delete-and-insert mutation.

use std::collections::HashSet;

use rand::Rng;

use crate::distance::{DistanceMatrix, ProfitVector};
use crate::ga::population::Population;

/// Removes interior duplicates from `path`, preserving first-occurrence
/// order and treating `start`/`end` as already seen.
///
/// # Examples
///
/// ```
/// use stsp_ga::ga::unique_path;
///
/// assert_eq!(
///     unique_path(&[0, 1, 0, 3, 1, 4, 9, 5, 3, 0], 0, 0),
///     vec![0, 1, 3, 4, 9, 5, 0],
/// );
/// ```
pub fn unique_path(path: &[usize], start: usize, end: usize) -> Vec<usize> {
    let mut seen: HashSet<usize> = HashSet::new();
    seen.insert(start);
    seen.insert(end);
    let mut out = vec![start];
    if path.len() > 2 {
        for &x in &path[1..path.len() - 1] {
            if seen.insert(x) {
                out.push(x);
            }
        }
    }
    out.push(end);
    out
}

/// Mutates every individual in the population in place:
///
/// 1. If the path has interior points, deduplicate it via [`unique_path`].
/// 2. Delete one interior element at a uniformly random position.
/// 3. Pick a random insertion position and greedily insert candidates
///    ordered by ascending distance (ties broken by descending profit,
///    when a profit vector is supplied), stopping at the first
///    candidate that would push the cost to `max_cost` or beyond.
pub fn mutate<R: Rng>(
    population: &mut Population,
    start: usize,
    end: usize,
    max_cost: f64,
    distances: &DistanceMatrix,
    profits: Option<&ProfitVector>,
    rng: &mut R,
) {
    for ind in population.individuals_mut() {
        let mut path = ind.path().to_vec();

        if path.len() > 2 {
            path = unique_path(&path, start, end);
        }

        if path.len() > 2 {
            let remove_at = rng.random_range(1..=path.len() - 2);
            path.remove(remove_at);
        }

        let insert_at = rng.random_range(1..path.len());
        let from = path[insert_at - 1];

        let mut order: Vec<usize> = (0..distances.size()).collect();
        let row = distances.row(from);
        order.sort_by(|&a, &b| {
            let da = row[a];
            let db = row[b];
            da.partial_cmp(&db)
                .expect("distance should not be NaN")
                .then_with(|| match profits {
                    Some(w) => w
                        .get(b)
                        .partial_cmp(&w.get(a))
                        .expect("profit should not be NaN"),
                    None => std::cmp::Ordering::Equal,
                })
        });

        let mut in_path: HashSet<usize> = path.iter().copied().collect();
        for candidate in order {
            if in_path.contains(&candidate) {
                continue;
            }
            let mut trial = path.clone();
            trial.insert(insert_at, candidate);
            let cost = distances.path_cost(&trial);
            if cost < max_cost {
                path = trial;
                in_path.insert(candidate);
                ind.set_path(path.clone(), cost);
            } else {
                break;
            }
        }

        let final_cost = distances.path_cost(&path);
        ind.set_path(path, final_cost);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::individual::Individual;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn unique_path_matches_spec_example_loop() {
        assert_eq!(
            unique_path(&[0, 1, 0, 3, 1, 4, 9, 5, 3, 0], 0, 0),
            vec![0, 1, 3, 4, 9, 5, 0]
        );
    }

    #[test]
    fn unique_path_matches_spec_example_start_end_distinct() {
        assert_eq!(
            unique_path(&[0, 1, 1, 0, 3, 1, 4, 9, 5, 3, 1], 0, 1),
            vec![0, 3, 4, 9, 5, 1]
        );
    }

    #[test]
    fn unique_path_handles_minimal_path() {
        assert_eq!(unique_path(&[0, 5], 0, 5), vec![0, 5]);
    }

    fn chain_dm(n: usize) -> DistanceMatrix {
        let mut data = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                if i != j {
                    data[i * n + j] = 1.0;
                }
            }
        }
        DistanceMatrix::from_data(n, data).unwrap()
    }

    #[test]
    fn mutation_preserves_start_end_and_stays_under_max_cost() {
        let dm = chain_dm(8);
        let mut pop = Population::from_individuals(vec![
            Individual::new(vec![0, 1, 2, 7], &dm),
            Individual::new(vec![0, 3, 7], &dm),
        ]);
        let mut rng = StdRng::seed_from_u64(3);
        mutate(&mut pop, 0, 7, 6.0, &dm, None, &mut rng);
        for ind in pop.individuals() {
            assert_eq!(ind.path()[0], 0);
            assert_eq!(*ind.path().last().unwrap(), 7);
            assert!(ind.cost() < 6.0);
            let mut seen = HashSet::new();
            assert!(ind.path().iter().all(|x| seen.insert(*x)));
        }
    }

    #[test]
    fn mutation_never_exceeds_max_cost_even_when_tight() {
        let dm = chain_dm(5);
        let mut pop = Population::from_individuals(vec![Individual::new(vec![0, 4], &dm)]);
        let mut rng = StdRng::seed_from_u64(9);
        mutate(&mut pop, 0, 4, 1.5, &dm, None, &mut rng);
        assert!(pop.individuals()[0].cost() < 1.5);
    }

    proptest::proptest! {
        #[test]
        fn mutation_never_introduces_a_duplicate_location(
            seed in any::<u64>(),
            n in 6usize..20,
            max_cost in 5.0f64..50.0,
        ) {
            let dm = chain_dm(n);
            let mut rng = StdRng::seed_from_u64(seed);
            let end = n - 1;
            let mut pop = Population::from_individuals(vec![Individual::new(vec![0, end], &dm)]);
            mutate(&mut pop, 0, end, max_cost, &dm, None, &mut rng);
            let path = pop.individuals()[0].path();
            let mut seen = HashSet::new();
            prop_assert!(path.iter().all(|x| seen.insert(*x)));
        }
    }
}
