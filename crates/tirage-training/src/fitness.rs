//! Monte-Carlo fitness of a chromosome.
//!
//! Fitness is the mean size of the grids a chromosome produces:
//!
//! ```text
//! fitness = Σ (|primary| + |secondary|) / trials
//! ```
//!
//! Since sampling draws with replacement and then drops duplicates, a grid is full only
//! when no item was drawn twice. Fitness therefore rewards weightings that spread
//! probability mass enough to avoid collisions, and lies in
//! `[0, primary_count + secondary_count]`.
//!
//! This is a structural proxy. It says nothing about how well a grid matches future
//! draws.

use rand::Rng;
use tirage_engine::HistoricalDraw;

use crate::{
    chromosome::Chromosome,
    grid::{GridGenerator, InvalidSamplingWeights},
};

/// Upper bound on the number of trials per evaluation.
pub const MAX_TRIALS: usize = 50;

/// Evaluates chromosomes by sampling a fixed number of grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitnessEvaluator {
    trial_count: usize,
}

impl FitnessEvaluator {
    #[must_use]
    pub fn new(trial_count: usize) -> Self {
        Self { trial_count }
    }

    /// One trial per historical draw, capped at `max_trials`.
    #[must_use]
    pub fn for_draws(draws: &[HistoricalDraw], max_trials: usize) -> Self {
        Self::new(draws.len().min(max_trials))
    }

    #[must_use]
    pub fn trial_count(&self) -> usize {
        self.trial_count
    }

    /// Mean grid size over `trial_count` generated grids (0 when there are no trials).
    ///
    /// The first sampling failure aborts the evaluation.
    #[expect(clippy::cast_precision_loss)]
    pub fn evaluate<R>(
        &self,
        generator: &GridGenerator<'_>,
        chromosome: &Chromosome,
        rng: &mut R,
    ) -> Result<f32, InvalidSamplingWeights>
    where
        R: Rng + ?Sized,
    {
        if self.trial_count == 0 {
            return Ok(0.0);
        }
        let mut total = 0;
        for _ in 0..self.trial_count {
            total += generator.generate(chromosome, rng)?.len();
        }
        Ok(total as f32 / self.trial_count as f32)
    }
}
