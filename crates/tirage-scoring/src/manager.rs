use std::{slice, vec};

use tirage_engine::{HistoricalDraw, Pool, RuleSet};

use crate::module::{BoxedScoringModule, EntityScores, ScoringModule};

/// Scores of every registered module, in registration order.
///
/// Built once per training run and read-only afterwards. Entry `i` belongs to module
/// `i` and is weighted by weight `i` of a chromosome.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreProfile {
    entries: Vec<EntityScores>,
}

impl ScoreProfile {
    #[must_use]
    pub fn new(entries: Vec<EntityScores>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&EntityScores> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, EntityScores> {
        self.entries.iter()
    }
}

impl IntoIterator for ScoreProfile {
    type Item = EntityScores;
    type IntoIter = vec::IntoIter<EntityScores>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a ScoreProfile {
    type Item = &'a EntityScores;
    type IntoIter = slice::Iter<'a, EntityScores>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("scoring module `{module}` produced invalid output: {reason}")]
pub struct InvalidModuleOutput {
    pub module: String,
    pub reason: String,
}

/// Ordered list of scoring modules.
///
/// The registration order is the index order of the [`ScoreProfile`] and of every
/// weight vector of a run; it never changes once training starts.
#[derive(Debug, Clone, Default)]
pub struct ModuleManager {
    modules: Vec<BoxedScoringModule>,
}

impl ModuleManager {
    #[must_use]
    pub fn new(modules: Vec<BoxedScoringModule>) -> Self {
        Self { modules }
    }

    pub fn push<M>(&mut self, module: M)
    where
        M: ScoringModule + 'static,
    {
        self.modules.push(Box::new(module));
    }

    #[must_use]
    pub fn modules(&self) -> &[BoxedScoringModule] {
        &self.modules
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Module names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Runs every module once and collects their scores.
    ///
    /// The first module that fails, or returns a negative or non-finite score, aborts
    /// the whole build; no partial profile is returned.
    pub fn profiles(
        &self,
        draws: &[HistoricalDraw],
        rules: &RuleSet,
    ) -> Result<ScoreProfile, InvalidModuleOutput> {
        let entries = self
            .modules
            .iter()
            .map(|module| {
                let invalid = |reason: String| InvalidModuleOutput {
                    module: module.name(),
                    reason,
                };
                let scores = module
                    .entity_scores(draws, rules)
                    .map_err(|e| invalid(e.reason().to_owned()))?;
                check_scores(&scores).map_err(invalid)?;
                log::debug!(
                    "module {}: {} primary / {} secondary scores",
                    module.name(),
                    scores.primary.len(),
                    scores.secondary.len()
                );
                Ok(scores)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ScoreProfile::new(entries))
    }
}

fn check_scores(scores: &EntityScores) -> Result<(), String> {
    for pool in Pool::ALL {
        if let Some((item, score)) = scores
            .pool(pool)
            .iter()
            .find(|(_, score)| !score.is_finite() || **score < 0.0)
        {
            return Err(format!("{pool} item {item} has score {score}"));
        }
    }
    Ok(())
}
