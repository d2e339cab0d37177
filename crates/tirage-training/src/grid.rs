//! Weighted aggregation and sampling of grids.
//!
//! A grid is produced from a chromosome in two steps:
//!
//! 1. **Aggregate** - every module's scores are scaled by the module's weight and summed
//!    per item, separately for the primary and secondary pools
//! 2. **Sample** - `count` items are drawn per pool with probability proportional to the
//!    aggregated score, *with replacement*, then deduplicated and sorted
//!
//! Because sampling is with replacement, a selection may come out shorter than the
//! count the rules ask for. This is kept as is: there is no resampling to top the grid
//! up, and the fitness proxy (see [`fitness`](crate::fitness)) depends on it.

use std::collections::BTreeMap;

use rand::{
    Rng,
    distr::{Distribution as _, weighted::WeightedIndex},
};
use tirage_engine::{Grid, Pool, RuleSet};
use tirage_scoring::ScoreProfile;

use crate::chromosome::Chromosome;

/// Sampling is impossible: the pool's aggregated scores are empty, all zero, or invalid.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid sampling weights for the {pool} pool: no positive aggregated score")]
pub struct InvalidSamplingWeights {
    pub pool: Pool,
}

/// Weighted score of each item, summed over all modules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregateScores {
    pub primary: BTreeMap<u32, f32>,
    pub secondary: BTreeMap<u32, f32>,
}

impl AggregateScores {
    #[must_use]
    pub fn pool(&self, pool: Pool) -> &BTreeMap<u32, f32> {
        match pool {
            Pool::Primary => &self.primary,
            Pool::Secondary => &self.secondary,
        }
    }
}

/// Generates grids from chromosomes over a fixed score profile and rule set.
#[derive(Debug, Clone, Copy)]
pub struct GridGenerator<'a> {
    profile: &'a ScoreProfile,
    rules: &'a RuleSet,
}

impl<'a> GridGenerator<'a> {
    #[must_use]
    pub fn new(profile: &'a ScoreProfile, rules: &'a RuleSet) -> Self {
        Self { profile, rules }
    }

    #[must_use]
    pub fn profile(&self) -> &'a ScoreProfile {
        self.profile
    }

    #[must_use]
    pub fn rules(&self) -> &'a RuleSet {
        self.rules
    }

    /// Sums `score * weight` per item over every module of the profile.
    ///
    /// # Panics
    ///
    /// Panics if the chromosome length differs from the profile length.
    #[must_use]
    pub fn aggregate(&self, chromosome: &Chromosome) -> AggregateScores {
        assert_eq!(
            chromosome.len(),
            self.profile.len(),
            "chromosome must hold one weight per scoring module"
        );
        let mut aggregate = AggregateScores::default();
        for (scores, &weight) in self.profile.iter().zip(chromosome.weights()) {
            for (&item, &score) in &scores.primary {
                *aggregate.primary.entry(item).or_insert(0.0) += score * weight;
            }
            for (&item, &score) in &scores.secondary {
                *aggregate.secondary.entry(item).or_insert(0.0) += score * weight;
            }
        }
        aggregate
    }

    /// Samples one grid for `chromosome`.
    pub fn generate<R>(
        &self,
        chromosome: &Chromosome,
        rng: &mut R,
    ) -> Result<Grid, InvalidSamplingWeights>
    where
        R: Rng + ?Sized,
    {
        let aggregate = self.aggregate(chromosome);
        let primary = sample_with_replacement(
            &aggregate.primary,
            self.rules.primary_count,
            Pool::Primary,
            rng,
        )?;
        let secondary = sample_with_replacement(
            &aggregate.secondary,
            self.rules.secondary_count,
            Pool::Secondary,
            rng,
        )?;
        Ok(Grid::from_draws(primary, secondary))
    }
}

/// Draws `count` items with probability proportional to their score.
///
/// Nothing is sampled (and the scores are not checked) when `count` is zero.
fn sample_with_replacement<R>(
    scores: &BTreeMap<u32, f32>,
    count: usize,
    pool: Pool,
    rng: &mut R,
) -> Result<Vec<u32>, InvalidSamplingWeights>
where
    R: Rng + ?Sized,
{
    if count == 0 {
        return Ok(vec![]);
    }
    let valid = scores.values().all(|w| w.is_finite() && *w >= 0.0)
        && scores.values().any(|w| *w > 0.0);
    if !valid {
        return Err(InvalidSamplingWeights { pool });
    }
    let index =
        WeightedIndex::new(scores.values().copied()).map_err(|_| InvalidSamplingWeights { pool })?;
    let items = scores.keys().copied().collect::<Vec<_>>();
    Ok((0..count).map(|_| items[index.sample(rng)]).collect())
}
