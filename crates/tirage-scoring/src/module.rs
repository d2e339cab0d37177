use std::{collections::BTreeMap, fmt};

use tirage_engine::{HistoricalDraw, Pool, RuleSet};

/// Per-item scores produced by one scoring module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityScores {
    pub primary: BTreeMap<u32, f32>,
    pub secondary: BTreeMap<u32, f32>,
}

impl EntityScores {
    #[must_use]
    pub fn new(primary: BTreeMap<u32, f32>, secondary: BTreeMap<u32, f32>) -> Self {
        Self { primary, secondary }
    }

    /// Builds scores by applying `f` to every item of both ranges of `rules`.
    pub fn from_fn<F>(rules: &RuleSet, mut f: F) -> Self
    where
        F: FnMut(Pool, u32) -> f32,
    {
        let mut table = |pool: Pool| -> BTreeMap<u32, f32> {
            rules
                .range(pool)
                .iter()
                .map(|item| (item, f(pool, item)))
                .collect()
        };
        let primary = table(Pool::Primary);
        let secondary = table(Pool::Secondary);
        Self { primary, secondary }
    }

    #[must_use]
    pub fn pool(&self, pool: Pool) -> &BTreeMap<u32, f32> {
        match pool {
            Pool::Primary => &self.primary,
            Pool::Secondary => &self.secondary,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.secondary.is_empty()
    }
}

/// Failure reported by a scoring module.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("{reason}")]
pub struct ModuleError {
    reason: String,
}

impl ModuleError {
    pub fn new<S>(reason: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Produces per-item scores from historical draws.
///
/// Implementations must give consistent output for identical inputs for the duration
/// of a training run. Scores must be finite and non-negative; items without a score
/// are never sampled.
pub trait ScoringModule: fmt::Debug + Send + Sync {
    /// Short stable identifier, used to select modules from the command line.
    #[must_use]
    fn id(&self) -> &str;

    /// Display name, used as the key of the per-module weight report.
    #[must_use]
    fn name(&self) -> String;

    #[must_use]
    fn clone_boxed(&self) -> BoxedScoringModule;

    fn entity_scores(
        &self,
        draws: &[HistoricalDraw],
        rules: &RuleSet,
    ) -> Result<EntityScores, ModuleError>;
}

pub type BoxedScoringModule = Box<dyn ScoringModule>;

impl Clone for BoxedScoringModule {
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

impl ScoringModule for BoxedScoringModule {
    fn id(&self) -> &str {
        self.as_ref().id()
    }

    fn name(&self) -> String {
        self.as_ref().name()
    }

    fn clone_boxed(&self) -> BoxedScoringModule {
        self.as_ref().clone_boxed()
    }

    fn entity_scores(
        &self,
        draws: &[HistoricalDraw],
        rules: &RuleSet,
    ) -> Result<EntityScores, ModuleError> {
        self.as_ref().entity_scores(draws, rules)
    }
}
