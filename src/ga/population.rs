//! Fixed-size population store and per-generation best log.

use super::individual::Individual;

/// A fixed-size bag of `P` individuals with no ordering invariant.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Wraps an already-built vector of individuals.
    pub fn from_individuals(individuals: Vec<Individual>) -> Self {
        Self { individuals }
    }

    /// Number of individuals currently held.
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// `true` if the population is empty.
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Read-only access to the individuals.
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Mutable access to the individuals, for operators that update
    /// paths/costs/fitness in place.
    pub fn individuals_mut(&mut self) -> &mut [Individual] {
        &mut self.individuals
    }

    /// Replaces the whole population (selection's offspring generation).
    /// The new population must have the same size as the old one.
    pub fn replace(&mut self, new_individuals: Vec<Individual>) {
        debug_assert_eq!(new_individuals.len(), self.individuals.len());
        self.individuals = new_individuals;
    }
}

/// The fittest individual captured at Selection for each generation
/// actually executed, up to `max_generations` slots.
///
/// Slots are grown lazily as generations run rather than materialized up
/// front: `max_generations` only reserves capacity (a single allocation,
/// no per-slot initialization), so a caller-supplied hard cap in the
/// millions costs nothing beyond the handful of generations a solve
/// actually executes before converging or running out of wall-clock
/// budget.
#[derive(Debug, Clone)]
pub struct BestLog {
    slots: Vec<Option<Individual>>,
    capacity: usize,
}

impl BestLog {
    /// Creates an empty log that reserves room for up to `max_generations`
    /// entries without constructing any of them.
    pub fn new(max_generations: usize) -> Self {
        Self {
            slots: Vec::with_capacity(max_generations),
            capacity: max_generations,
        }
    }

    /// Records the fittest individual of `generation`, growing the log
    /// up to `generation` (filling any skipped slots with `None`) if
    /// needed.
    pub fn record(&mut self, generation: usize, individual: Individual) {
        if generation >= self.slots.len() {
            self.slots.resize_with(generation + 1, || None);
        }
        self.slots[generation] = Some(individual);
    }

    /// Returns the recorded individual for `generation`, if any.
    pub fn get(&self, generation: usize) -> Option<&Individual> {
        self.slots.get(generation).and_then(|slot| slot.as_ref())
    }

    /// Total capacity (`max_generations`), not the number of slots
    /// actually grown/recorded.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over the recorded `(generation_index, individual)` pairs
    /// in range `[from, to)`, skipping unrecorded slots.
    pub fn recorded_in_range(
        &self,
        from: usize,
        to: usize,
    ) -> impl Iterator<Item = (usize, &Individual)> {
        let to = to.min(self.slots.len());
        (from..to).filter_map(move |g| self.slots[g].as_ref().map(|ind| (g, ind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;

    #[test]
    fn replace_preserves_size() {
        let dm = DistanceMatrix::new(3);
        let mut pop = Population::from_individuals(vec![
            Individual::new(vec![0, 1], &dm),
            Individual::new(vec![0, 2], &dm),
        ]);
        pop.replace(vec![
            Individual::new(vec![0, 1], &dm),
            Individual::new(vec![0, 2], &dm),
        ]);
        assert_eq!(pop.len(), 2);
    }

    #[test]
    fn best_log_records_and_retrieves() {
        let dm = DistanceMatrix::new(3);
        let mut log = BestLog::new(5);
        log.record(2, Individual::new(vec![0, 1], &dm));
        assert!(log.get(2).is_some());
        assert!(log.get(0).is_none());
    }

    #[test]
    fn best_log_does_not_preallocate_its_full_capacity() {
        let dm = DistanceMatrix::new(3);
        // A huge hard cap (as used by a `max_generations`-as-safety-net
        // config) must not eagerly materialize millions of `None` slots;
        // only generations actually recorded should grow the log.
        let mut log = BestLog::new(10_000_000);
        assert_eq!(log.capacity(), 10_000_000);
        assert_eq!(log.slots.len(), 0);
        log.record(0, Individual::new(vec![0, 1], &dm));
        log.record(3, Individual::new(vec![0, 2], &dm));
        assert_eq!(log.slots.len(), 4);
        assert!(log.get(3).is_some());
        assert!(log.get(1_000_000).is_none());
    }

    #[test]
    fn recorded_in_range_skips_empty_slots() {
        let dm = DistanceMatrix::new(3);
        let mut log = BestLog::new(5);
        log.record(1, Individual::new(vec![0, 1], &dm));
        log.record(3, Individual::new(vec![0, 2], &dm));
        let recorded: Vec<usize> = log.recorded_in_range(0, 5).map(|(g, _)| g).collect();
        assert_eq!(recorded, vec![1, 3]);
    }
}
