//! Training run configuration.

use std::time::{Duration, Instant};

use crate::fitness::MAX_TRIALS;

/// Parameters of a training run.
///
/// The default reproduces the reference search: 40 generations, one fresh random
/// candidate per generation, at most 50 fitness trials, no early stop.
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    /// Number of generations after the initial candidate.
    pub generations: usize,
    /// Candidates evaluated per generation.
    pub population_size: usize,
    /// Cap on the number of fitness trials (the trial count is `min(max_trials, draws)`).
    pub max_trials: usize,
    pub strategy: SearchStrategy,
    pub stop: StopCondition,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            generations: 40,
            population_size: 1,
            max_trials: MAX_TRIALS,
            strategy: SearchStrategy::RandomRestart,
            stop: StopCondition::default(),
        }
    }
}

/// How candidates of a generation are proposed.
#[derive(Debug, Clone, Default)]
pub enum SearchStrategy {
    /// Every candidate is a fresh random chromosome; the best one seen is kept.
    #[default]
    RandomRestart,
    /// Candidates are bred from the previous generation.
    ///
    /// This is an enhancement over random-restart search, not part of the baseline
    /// behavior. See [`genetic`](crate::genetic).
    Genetic(GeneticParams),
}

/// Parameters of the genetic search strategy.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneticParams {
    /// Top individuals copied unchanged into the next generation.
    pub elite_count: usize,
    /// Individuals competing in each tournament (larger = stronger selection pressure).
    pub tournament_size: usize,
    /// BLX-α range expansion.
    pub blx_alpha: f32,
    /// Standard deviation of the Gaussian mutation noise.
    pub mutation_sigma: f32,
    /// Probability of mutating each weight.
    pub mutation_rate: f32,
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self {
            elite_count: 2,
            tournament_size: 2,
            blx_alpha: 0.2,
            mutation_sigma: 0.05,
            mutation_rate: 0.3,
        }
    }
}

/// Optional limits that end the search before all generations ran.
///
/// Limits are checked between generations, so the last generation may overrun the
/// evaluation budget by up to `population_size - 1` evaluations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StopCondition {
    pub deadline: Option<Instant>,
    pub max_evaluations: Option<usize>,
}

impl StopCondition {
    /// Stops once `limit` has elapsed from now.
    #[must_use]
    pub fn time_limit(limit: Duration) -> Self {
        Self {
            deadline: Instant::now().checked_add(limit),
            max_evaluations: None,
        }
    }

    #[must_use]
    pub fn with_max_evaluations(self, max_evaluations: usize) -> Self {
        Self {
            max_evaluations: Some(max_evaluations),
            ..self
        }
    }

    #[must_use]
    pub fn should_stop(&self, evaluations: usize) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
            || self.max_evaluations.is_some_and(|max| evaluations >= max)
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("invalid training configuration: {reason}")]
pub struct ConfigError {
    reason: String,
}

impl ConfigError {
    pub(crate) fn new<S>(reason: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            reason: reason.into(),
        }
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::new("population size must be at least 1"));
        }
        if let SearchStrategy::Genetic(params) = &self.strategy {
            params.validate(self.population_size)?;
        }
        Ok(())
    }
}

impl GeneticParams {
    pub fn validate(&self, population_size: usize) -> Result<(), ConfigError> {
        if population_size < 2 {
            return Err(ConfigError::new(
                "genetic search needs a population of at least 2",
            ));
        }
        if self.elite_count >= population_size {
            return Err(ConfigError::new(format!(
                "elite count {} must be below the population size {population_size}",
                self.elite_count
            )));
        }
        if self.tournament_size == 0 || self.tournament_size > population_size {
            return Err(ConfigError::new(format!(
                "tournament size {} must be within 1..={population_size}",
                self.tournament_size
            )));
        }
        if !(self.blx_alpha.is_finite() && self.blx_alpha >= 0.0) {
            return Err(ConfigError::new("BLX-α must be a non-negative number"));
        }
        if !(self.mutation_sigma.is_finite() && self.mutation_sigma >= 0.0) {
            return Err(ConfigError::new("mutation sigma must be a non-negative number"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::new("mutation rate must be within 0..=1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        TrainingConfig::default().validate().unwrap();
    }

    #[test]
    fn test_zero_population_is_rejected() {
        let config = TrainingConfig {
            population_size: 0,
            ..TrainingConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_genetic_needs_room_for_offspring() {
        let mut config = TrainingConfig {
            population_size: 2,
            strategy: SearchStrategy::Genetic(GeneticParams::default()),
            ..TrainingConfig::default()
        };
        // elite_count == population_size leaves no offspring
        assert!(config.validate().is_err());
        config.population_size = 10;
        config.validate().unwrap();
    }

    #[test]
    fn test_invalid_mutation_rate() {
        let params = GeneticParams {
            mutation_rate: 1.5,
            ..GeneticParams::default()
        };
        assert!(params.validate(10).is_err());
    }

    #[test]
    fn test_stop_condition() {
        let stop = StopCondition::default();
        assert!(!stop.should_stop(usize::MAX));

        let stop = stop.with_max_evaluations(5);
        assert!(!stop.should_stop(4));
        assert!(stop.should_stop(5));

        let expired = StopCondition {
            deadline: Some(Instant::now()),
            max_evaluations: None,
        };
        assert!(expired.should_stop(0));
        assert!(!StopCondition::time_limit(Duration::from_secs(3600)).should_stop(0));
    }
}
