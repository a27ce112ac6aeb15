//! Generation controller: the `solve` / `calc_tour` entry points.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::distance::{DistanceMatrix, ProfitVector};
use crate::error::ConfigError;

use super::config::GaConfig;
use super::init::{init_population_loop, init_population_tour};
use super::operators::{crossover, mutation, selection};
use super::population::{BestLog, Population};

/// Why a `solve` call stopped iterating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No generations ran — the `start`/`end` pair was unreachable
    /// within `max_cost`.
    NotRun,
    /// Stopped because `max_runtime_ms` elapsed.
    MaxRuntime,
    /// Stopped because cost/fitness converged.
    Converged,
    /// Ran to `max_generations` without converging or running out of time.
    MaxGenerations,
}

/// Runs the selective-TSP genetic algorithm over a fixed distance
/// matrix, optional profit vector, and cost budget.
///
/// All solver inputs (`start`, `end`, the distance matrix, the optional
/// profit vector, and `max_cost`) are constant for the solver's
/// lifetime — build one `GaSolver` per solve.
///
/// # Examples
///
/// ```
/// use stsp_ga::distance::DistanceMatrix;
/// use stsp_ga::ga::{GaConfig, GaSolver};
///
/// let dm = DistanceMatrix::from_data(4, vec![
///     0.0, 1.0, 1.0, 1.0,
///     1.0, 0.0, 1.0, 1.0,
///     1.0, 1.0, 0.0, 1.0,
///     1.0, 1.0, 1.0, 0.0,
/// ]).unwrap();
///
/// let config = GaConfig::default()
///     .with_population_size(50)
///     .with_max_generations(20)
///     .with_seed(1);
///
/// let mut solver = GaSolver::new(0, 1, dm, None, 10.0, config).unwrap();
/// let (path, cost) = solver.solve();
/// assert_eq!(path[0], 0);
/// assert_eq!(*path.last().unwrap(), 1);
/// assert!(cost < 10.0);
/// ```
pub struct GaSolver {
    start: usize,
    end: usize,
    distances: DistanceMatrix,
    profits: Option<ProfitVector>,
    max_cost: f64,
    config: GaConfig,
    rng: StdRng,
    last_stop_reason: StopReason,
    last_generations_run: usize,
}

impl GaSolver {
    /// Builds a solver, validating the configuration against the given
    /// matrix, profits, and `max_cost`.
    pub fn new(
        start: usize,
        end: usize,
        distances: DistanceMatrix,
        profits: Option<ProfitVector>,
        max_cost: f64,
        config: GaConfig,
    ) -> Result<Self, ConfigError> {
        config.validate(start, end, max_cost, &distances, profits.as_ref())?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            start,
            end,
            distances,
            profits,
            max_cost,
            config,
            rng,
            last_stop_reason: StopReason::NotRun,
            last_generations_run: 0,
        })
    }

    /// Why the most recent `solve`/`calc_tour` call stopped.
    pub fn last_stop_reason(&self) -> StopReason {
        self.last_stop_reason
    }

    /// How many post-initial generations the most recent call actually ran.
    pub fn last_generations_run(&self) -> usize {
        self.last_generations_run
    }

    /// Runs the genetic algorithm to termination and returns `(path,
    /// cost)` for the single best individual recorded across every bred
    /// generation, falling back to generation 0's pre-loop initial
    /// selection snapshot only if no bred generation ever completed.
    pub fn solve(&mut self) -> (Vec<usize>, f64) {
        self.calc_tour(None)
    }

    /// As [`Self::solve`], but selects the best individual from only the
    /// last `last_n` recorded generations, excluding generation 0 (the
    /// pre-loop initial Selection snapshot) whenever at least one bred
    /// generation exists to consider instead. `last_n = None` considers
    /// every generation actually executed.
    pub fn calc_tour(&mut self, last_n: Option<usize>) -> (Vec<usize>, f64) {
        if self.distances.get(self.start, self.end) >= self.max_cost {
            self.last_stop_reason = StopReason::NotRun;
            self.last_generations_run = 0;
            return (Vec::new(), 0.0);
        }

        let best_log = self.run();

        let executed = self.last_generations_run;
        let to = executed + 1;
        let window = last_n.unwrap_or(executed);
        // Generation 0 (the pre-loop initial Selection snapshot) is only
        // excluded once a bred generation exists to take its place. If
        // the runtime budget (or an unreasonably low `max_generations`)
        // expired before generation 1 ever completed, slot 0 is the only
        // individual on record, and spec.md §7 guarantees the result is
        // never empty for a reachable start/end pair.
        let lo = if executed == 0 {
            0
        } else if window == 0 {
            to
        } else {
            to.saturating_sub(window).max(1)
        };

        let fittest = best_log
            .recorded_in_range(lo, to)
            .max_by(|(_, a), (_, b)| {
                a.fitness()
                    .partial_cmp(&b.fitness())
                    .expect("fitness should not be NaN")
            });

        match fittest {
            Some((_, ind)) => (ind.path().to_vec(), ind.cost()),
            None => (Vec::new(), 0.0),
        }
    }

    fn run(&mut self) -> BestLog {
        let mut population = if self.start == self.end {
            init_population_loop(
                self.start,
                self.config.population_size,
                self.max_cost,
                &self.distances,
                &mut self.rng,
            )
        } else {
            init_population_tour(
                self.start,
                self.end,
                self.config.population_size,
                self.max_cost,
                &self.distances,
                &mut self.rng,
            )
        };

        let mut best_log = BestLog::new(self.config.max_generations);
        let start_time = Instant::now();
        let max_runtime = std::time::Duration::from_millis(self.config.max_runtime_ms);
        let window = self.config.min_generations.min(5);

        // Initial Selection, before any Crossover/Mutation, seeds best_log[0].
        selection::select(
            &mut population,
            &mut best_log,
            0,
            self.max_cost,
            self.profits.as_ref(),
            &mut self.rng,
        );

        let mut stop_reason = StopReason::MaxGenerations;
        let mut last_generation = 0;

        for generation in 1..self.config.max_generations {
            if start_time.elapsed() >= max_runtime {
                stop_reason = StopReason::MaxRuntime;
                break;
            }

            if generation > self.config.min_generations
                && self.has_converged(&best_log, generation, window) == Some(true)
            {
                stop_reason = StopReason::Converged;
                break;
            }

            crossover::crossover(
                &mut population,
                self.start,
                self.end,
                self.max_cost,
                &self.distances,
                &mut self.rng,
            );
            mutation::mutate(
                &mut population,
                self.start,
                self.end,
                self.max_cost,
                &self.distances,
                self.profits.as_ref(),
                &mut self.rng,
            );
            selection::select(
                &mut population,
                &mut best_log,
                generation,
                self.max_cost,
                self.profits.as_ref(),
                &mut self.rng,
            );

            last_generation = generation;
        }

        self.last_stop_reason = stop_reason;
        self.last_generations_run = last_generation;
        best_log
    }

    /// Fitness/cost convergence check, guarded against the empty-slice
    /// case that arises before `window` generations have run.
    fn has_converged(&self, best_log: &BestLog, generation: usize, window: usize) -> Option<bool> {
        if generation <= window {
            return None;
        }

        let recent: Vec<_> = best_log
            .recorded_in_range(generation - window, generation)
            .collect();
        let prior: Vec<_> = best_log.recorded_in_range(0, generation - window).collect();
        if recent.is_empty() || prior.is_empty() {
            return None;
        }

        let recent_max_fitness = recent
            .iter()
            .map(|(_, ind)| ind.fitness())
            .fold(f64::NEG_INFINITY, f64::max);
        let prior_max_fitness = prior
            .iter()
            .map(|(_, ind)| ind.fitness())
            .fold(f64::NEG_INFINITY, f64::max);
        let delta_fitness = recent_max_fitness - prior_max_fitness;

        let recent_max_cost = recent
            .iter()
            .map(|(_, ind)| ind.cost())
            .fold(f64::NEG_INFINITY, f64::max);
        let recent_min_cost = recent
            .iter()
            .map(|(_, ind)| ind.cost())
            .fold(f64::INFINITY, f64::min);
        let delta_cost = recent_max_cost - recent_min_cost;

        Some(
            delta_fitness < self.max_cost
                && delta_cost / self.max_cost < self.config.termination_threshold,
        )
    }
}
