//! Common-gene splice crossover.

use std::collections::HashSet;

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;

use crate::distance::DistanceMatrix;
use crate::ga::population::Population;

/// Pairs the population randomly into disjoint couples and, for each
/// couple that shares at least one interior location, splices the two
/// paths at a randomly chosen shared gene. Each child replaces its
/// parent in place only if its cost stays strictly below `max_cost`;
/// the two children's acceptance is decided independently. If the
/// population size is odd, the last, unpaired individual is untouched.
pub fn crossover<R: Rng>(
    population: &mut Population,
    start: usize,
    end: usize,
    max_cost: f64,
    distances: &DistanceMatrix,
    rng: &mut R,
) {
    let n = population.len();
    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    let mut pair = 0;
    while pair + 1 < n {
        let ia = order[pair];
        let ib = order[pair + 1];
        pair += 2;

        let (path_a, path_b) = {
            let individuals = population.individuals();
            (
                individuals[ia].path().to_vec(),
                individuals[ib].path().to_vec(),
            )
        };

        let common = common_genes(&path_a, &path_b, start, end);
        if common.is_empty() {
            continue;
        }
        let gene = *common.choose(rng).unwrap();

        let cross_a = path_a.iter().position(|&x| x == gene).unwrap() + 1;
        let cross_b = path_b.iter().position(|&x| x == gene).unwrap() + 1;

        let mut child_a = path_a[..cross_a].to_vec();
        child_a.extend_from_slice(&path_b[cross_b..]);
        let mut child_b = path_b[..cross_b].to_vec();
        child_b.extend_from_slice(&path_a[cross_a..]);

        let cost_a = distances.path_cost(&child_a);
        if cost_a < max_cost {
            population.individuals_mut()[ia].set_path(child_a, cost_a);
        }

        let cost_b = distances.path_cost(&child_b);
        if cost_b < max_cost {
            population.individuals_mut()[ib].set_path(child_b, cost_b);
        }
    }
}

/// Interior locations visited by both `path_a` and `path_b`, deduplicated
/// (the set intersection of both paths, minus the fixed endpoints). Each
/// shared location appears at most once regardless of how many times it
/// repeats in either path, so a uniform `choose` over the result is
/// uniform over the shared *locations*, not over shared *occurrences*.
fn common_genes(path_a: &[usize], path_b: &[usize], start: usize, end: usize) -> Vec<usize> {
    let set_a: HashSet<usize> = path_a.iter().copied().collect();
    let set_b: HashSet<usize> = path_b.iter().copied().collect();
    set_a
        .intersection(&set_b)
        .copied()
        .filter(|g| *g != start && *g != end)
        .collect()
}
