//! Generational search for the fittest chromosome.
//!
//! The optimizer keeps exactly one best [`FitnessRecord`]. It starts from a single
//! random chromosome, then for each generation:
//!
//! 1. checks the [`StopCondition`](crate::config::StopCondition),
//! 2. proposes `population_size` candidates (fresh random ones, or bred ones with the
//!    genetic strategy),
//! 3. evaluates them concurrently,
//! 4. replaces the best record with a candidate only when its fitness is strictly
//!    greater, scanning candidates in order.
//!
//! The best fitness therefore never decreases. Once the loop ends, one more grid is
//! generated from the best chromosome and returned as the final grid.
//!
//! # Reproducibility
//!
//! Every candidate is evaluated with its own [`Pcg64`] seeded from the master
//! generator before any thread is spawned, in candidate order. Results are reduced
//! after all threads joined, so a seeded run gives the same outcome regardless of
//! thread scheduling.

use std::{num::NonZeroUsize, thread};

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg64;
use tirage_engine::Grid;
use tirage_stats::descriptive::DescriptiveStats;

use crate::{
    chromosome::{Chromosome, FitnessRecord},
    config::{SearchStrategy, TrainingConfig},
    error::TrainingError,
    fitness::FitnessEvaluator,
    genetic::{Population, PopulationEvolver},
    grid::{GridGenerator, InvalidSamplingWeights},
};

/// Summary of one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// Zero-based generation index.
    pub generation: usize,
    /// Best fitness seen so far, including this generation.
    pub best_fitness: f32,
    /// Fitness of this generation's candidates.
    pub fitness: DescriptiveStats,
    /// Evaluations performed so far, including the initial one.
    pub evaluations: usize,
}

/// What a search run produced.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best: FitnessRecord,
    pub final_grid: Grid,
    pub history: Vec<GenerationReport>,
    pub evaluations: usize,
    /// Whether a stop condition ended the run before all generations ran.
    pub stopped_early: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct Optimizer<'a> {
    generator: GridGenerator<'a>,
    evaluator: FitnessEvaluator,
    config: &'a TrainingConfig,
}

impl<'a> Optimizer<'a> {
    #[must_use]
    pub fn new(
        generator: GridGenerator<'a>,
        evaluator: FitnessEvaluator,
        config: &'a TrainingConfig,
    ) -> Self {
        Self {
            generator,
            evaluator,
            config,
        }
    }

    /// Runs the search to completion.
    ///
    /// Any evaluation failure aborts the run.
    pub fn run<R>(&self, rng: &mut R) -> Result<SearchResult, TrainingError>
    where
        R: Rng + ?Sized,
    {
        let config = self.config;
        config.validate()?;
        let evolver = match &config.strategy {
            SearchStrategy::RandomRestart => None,
            SearchStrategy::Genetic(params) => {
                Some(PopulationEvolver::new(params, config.population_size)?)
            }
        };
        let len = self.generator.profile().len();

        let initial = Chromosome::random(rng, len);
        let fitness = self.evaluator.evaluate(&self.generator, &initial, rng)?;
        log::debug!("initial candidate: {:.3?} => {fitness:.3}", initial.weights());
        let mut best = FitnessRecord::new(initial, fitness);
        let mut evaluations = 1;
        let mut history = Vec::new();
        let mut population: Option<Population> = None;
        let mut stopped_early = false;

        for generation in 0..config.generations {
            if config.stop.should_stop(evaluations) {
                log::info!("stop condition reached after {evaluations} evaluations");
                stopped_early = true;
                break;
            }

            let candidates = match (&evolver, &population) {
                (Some(evolver), Some(population)) => evolver.evolve(population, rng),
                _ => (0..config.population_size)
                    .map(|_| Chromosome::random(rng, len))
                    .collect(),
            };
            let fitness = self.evaluate_batch(&candidates, rng)?;
            evaluations += candidates.len();

            for (chromosome, &value) in candidates.iter().zip(&fitness) {
                log::debug!("  candidate: {:.3?} => {value:.3}", chromosome.weights());
                if value > best.fitness {
                    best = FitnessRecord::new(chromosome.clone(), value);
                }
            }

            if let Some(stats) = DescriptiveStats::new(fitness.iter().copied()) {
                log::info!(
                    "generation #{generation}: best {:.3}, min {:.3} / mean {:.3} / max {:.3}",
                    best.fitness,
                    stats.min,
                    stats.mean,
                    stats.max,
                );
                history.push(GenerationReport {
                    generation,
                    best_fitness: best.fitness,
                    fitness: stats,
                    evaluations,
                });
            }

            if evolver.is_some() {
                let evaluated = Population::from_evaluated(candidates, fitness);
                log::debug!(
                    "  weight spread: {:.3?}",
                    evaluated
                        .compute_weight_stats()
                        .iter()
                        .map(DescriptiveStats::normalized_std_dev)
                        .collect::<Vec<_>>()
                );
                population = Some(evaluated);
            }
        }

        let final_grid = self.generator.generate(&best.chromosome, rng)?;
        Ok(SearchResult {
            best,
            final_grid,
            history,
            evaluations,
            stopped_early,
        })
    }

    /// Evaluates the candidates on scoped threads, one contiguous chunk per available
    /// core.
    ///
    /// The returned fitness values are index-aligned with `candidates`. If several
    /// evaluations fail, the error of the first failing candidate is returned.
    fn evaluate_batch<R>(
        &self,
        candidates: &[Chromosome],
        rng: &mut R,
    ) -> Result<Vec<f32>, InvalidSamplingWeights>
    where
        R: Rng + ?Sized,
    {
        let seeds = candidates
            .iter()
            .map(|_| rng.random::<u64>())
            .collect::<Vec<_>>();
        let mut results: Vec<Result<f32, InvalidSamplingWeights>> =
            candidates.iter().map(|_| Ok(0.0)).collect();
        let workers = thread::available_parallelism().map_or(1, NonZeroUsize::get);
        let chunk_size = candidates.len().div_ceil(workers).max(1);

        thread::scope(|s| {
            for ((chunk, seeds), results) in candidates
                .chunks(chunk_size)
                .zip(seeds.chunks(chunk_size))
                .zip(results.chunks_mut(chunk_size))
            {
                let generator = self.generator;
                let evaluator = self.evaluator;
                s.spawn(move || {
                    for ((chromosome, &seed), result) in chunk.iter().zip(seeds).zip(results) {
                        let mut rng = Pcg64::seed_from_u64(seed);
                        *result = evaluator.evaluate(&generator, chromosome, &mut rng);
                    }
                });
            }
        });

        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use tirage_engine::{GameRules, ItemRange, RuleSet};
    use tirage_scoring::{EntityScores, ScoreProfile};

    use super::*;
    use crate::config::{GeneticParams, StopCondition};

    fn skewed_profile(rules: &RuleSet) -> ScoreProfile {
        ScoreProfile::new(vec![
            EntityScores::from_fn(rules, |_, _| 1.0),
            EntityScores::from_fn(rules, |_, item| if item == 1 { 100.0 } else { 0.0 }),
        ])
    }

    fn run(config: &TrainingConfig, seed: u64) -> SearchResult {
        let rules = GameRules::lookup("euromillions");
        let profile = skewed_profile(&rules);
        let generator = GridGenerator::new(&profile, &rules);
        Optimizer::new(generator, FitnessEvaluator::new(20), config)
            .run(&mut Pcg64::seed_from_u64(seed))
            .unwrap()
    }

    #[test]
    fn test_best_fitness_never_decreases() {
        let config = TrainingConfig {
            generations: 15,
            population_size: 4,
            ..TrainingConfig::default()
        };
        let result = run(&config, 1);
        assert_eq!(result.history.len(), 15);
        assert_eq!(result.evaluations, 1 + 15 * 4);
        assert!(
            result
                .history
                .windows(2)
                .all(|w| w[0].best_fitness <= w[1].best_fitness)
        );
        let last = result.history.last().unwrap();
        assert_eq!(last.best_fitness, result.best.fitness);
        assert!(result.history.iter().all(|r| r.fitness.max <= r.best_fitness));
    }

    #[test]
    fn test_seeded_runs_are_identical() {
        let config = TrainingConfig {
            generations: 8,
            population_size: 3,
            ..TrainingConfig::default()
        };
        let a = run(&config, 42);
        let b = run(&config, 42);
        assert_eq!(a.best, b.best);
        assert_eq!(a.final_grid, b.final_grid);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_max_evaluations_stops_early() {
        let config = TrainingConfig {
            generations: 40,
            population_size: 2,
            stop: StopCondition::default().with_max_evaluations(7),
            ..TrainingConfig::default()
        };
        let result = run(&config, 5);
        assert!(result.stopped_early);
        // 1 initial + 3 generations of 2
        assert_eq!(result.evaluations, 7);
        assert_eq!(result.history.len(), 3);
    }

    #[test]
    fn test_zero_generations_keeps_initial_candidate() {
        let config = TrainingConfig {
            generations: 0,
            ..TrainingConfig::default()
        };
        let result = run(&config, 3);
        assert!(result.history.is_empty());
        assert_eq!(result.evaluations, 1);
        assert!(!result.stopped_early);
        assert_eq!(result.best.chromosome.len(), 2);
    }

    #[test]
    fn test_genetic_strategy_is_monotonic() {
        let config = TrainingConfig {
            generations: 10,
            population_size: 6,
            strategy: SearchStrategy::Genetic(GeneticParams::default()),
            ..TrainingConfig::default()
        };
        let result = run(&config, 8);
        assert_eq!(result.history.len(), 10);
        assert!(
            result
                .history
                .windows(2)
                .all(|w| w[0].best_fitness <= w[1].best_fitness)
        );
        assert!(
            result
                .best
                .chromosome
                .weights()
                .iter()
                .all(|w| (0.0..=1.0).contains(w))
        );
    }

    #[test]
    fn test_population_larger_than_core_count() {
        let config = TrainingConfig {
            generations: 2,
            population_size: 257,
            ..TrainingConfig::default()
        };
        let a = run(&config, 11);
        let b = run(&config, 11);
        assert_eq!(a.evaluations, 1 + 2 * 257);
        assert_eq!(a.history.len(), 2);
        assert!(a.history.iter().all(|r| r.fitness.count == 257));
        assert_eq!(a.best, b.best);
        assert_eq!(a.history, b.history);
    }

    #[test]
    fn test_sampling_failure_aborts_run() {
        let rules = RuleSet {
            primary_count: 1,
            primary_range: ItemRange::new(1, 5),
            ..RuleSet::default()
        };
        let profile = ScoreProfile::new(vec![EntityScores::default()]);
        let generator = GridGenerator::new(&profile, &rules);
        let config = TrainingConfig::default();
        let err = Optimizer::new(generator, FitnessEvaluator::new(5), &config)
            .run(&mut Pcg64::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, TrainingError::InvalidSamplingWeights(_)));
    }
}
