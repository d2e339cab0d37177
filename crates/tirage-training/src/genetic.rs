//! Genetic search strategy.
//!
//! The baseline optimizer is random-restart search: every candidate is a fresh random
//! chromosome. [`SearchStrategy::Genetic`](crate::config::SearchStrategy::Genetic)
//! replaces that proposal step by breeding candidates from the previous generation.
//! It is an enhancement, opt-in only.
//!
//! # Algorithm Overview
//!
//! 1. **Elite Selection** - The best `elite_count` chromosomes are copied unchanged
//! 2. **Tournament Selection** - Each parent is the fittest of `tournament_size` random picks
//! 3. **Crossover (BLX-α)** - Two parents are blended into one child
//! 4. **Mutation** - Gaussian noise is added to each weight with probability `mutation_rate`
//!
//! All weights stay within `[0, 1]`, the range random chromosomes are drawn from.
//!
//! Elites are re-evaluated in the next generation: fitness is a Monte-Carlo estimate,
//! so a lucky evaluation does not stick. The optimizer's best record is still only
//! replaced by a strictly higher fitness.

use rand::{Rng, seq::IndexedRandom as _};
use rand_distr::Normal;
use tirage_stats::descriptive::DescriptiveStats;

use crate::{
    chromosome::{Chromosome, FitnessRecord},
    config::{ConfigError, GeneticParams},
    weights,
};

const MAX_WEIGHT: f32 = 1.0;

/// Evaluated chromosomes of one generation, fittest first.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<FitnessRecord>,
}

impl Population {
    /// Pairs chromosomes with their fitness and sorts them by fitness, descending.
    ///
    /// # Panics
    ///
    /// Panics if the two vectors have different lengths.
    #[must_use]
    pub fn from_evaluated(chromosomes: Vec<Chromosome>, fitness: Vec<f32>) -> Self {
        assert_eq!(chromosomes.len(), fitness.len());
        let mut individuals = chromosomes
            .into_iter()
            .zip(fitness)
            .map(|(chromosome, fitness)| FitnessRecord::new(chromosome, fitness))
            .collect::<Vec<_>>();
        individuals.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
        Self { individuals }
    }

    #[must_use]
    pub fn individuals(&self) -> &[FitnessRecord] {
        &self.individuals
    }

    /// Spread of each module weight across the population.
    ///
    /// A shrinking normalized standard deviation indicates convergence.
    #[must_use]
    pub fn compute_weight_stats(&self) -> Vec<DescriptiveStats> {
        let len = self
            .individuals
            .first()
            .map_or(0, |ind| ind.chromosome.len());
        (0..len)
            .filter_map(|i| {
                DescriptiveStats::new(
                    self.individuals
                        .iter()
                        .map(|ind| ind.chromosome.weights()[i]),
                )
            })
            .collect()
    }
}

/// Breeds the next generation's candidates.
#[derive(Debug, Clone)]
pub struct PopulationEvolver {
    params: GeneticParams,
    population_size: usize,
    noise: Normal<f32>,
}

impl PopulationEvolver {
    pub fn new(params: &GeneticParams, population_size: usize) -> Result<Self, ConfigError> {
        params.validate(population_size)?;
        let noise = Normal::new(0.0, params.mutation_sigma)
            .map_err(|e| ConfigError::new(format!("mutation sigma: {e}")))?;
        Ok(Self {
            params: params.clone(),
            population_size,
            noise,
        })
    }

    /// Returns `population_size` chromosomes: the elites followed by bred offspring.
    #[must_use]
    pub fn evolve<R>(&self, population: &Population, rng: &mut R) -> Vec<Chromosome>
    where
        R: Rng + ?Sized,
    {
        let individuals = population.individuals();
        debug_assert!(individuals.is_sorted_by(|a, b| a.fitness >= b.fitness));

        let mut next = individuals
            .iter()
            .take(self.params.elite_count)
            .map(|ind| ind.chromosome.clone())
            .collect::<Vec<_>>();

        while next.len() < self.population_size {
            let (Some(p1), Some(p2)) = (
                tournament_select(individuals, self.params.tournament_size, rng),
                tournament_select(individuals, self.params.tournament_size, rng),
            ) else {
                break;
            };
            let mut child = weights::blx_alpha(
                p1.chromosome.weights(),
                p2.chromosome.weights(),
                self.params.blx_alpha,
                MAX_WEIGHT,
                rng,
            );
            weights::mutate(
                &mut child,
                &self.noise,
                MAX_WEIGHT,
                self.params.mutation_rate.into(),
                rng,
            );
            next.push(Chromosome::new(child));
        }
        next
    }
}

/// Picks `tournament_size` individuals at random and returns the fittest.
fn tournament_select<'a, R>(
    population: &'a [FitnessRecord],
    tournament_size: usize,
    rng: &mut R,
) -> Option<&'a FitnessRecord>
where
    R: Rng + ?Sized,
{
    population
        .choose_multiple(rng, tournament_size)
        .max_by(|a, b| a.fitness.total_cmp(&b.fitness))
}
