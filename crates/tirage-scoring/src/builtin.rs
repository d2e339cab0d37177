//! Built-in scoring modules.
//!
//! Each module reads the historical draws (oldest first) and scores every item of the
//! game's ranges, or only the items it has evidence for:
//!
//! | id          | module                | score                                               |
//! |-------------|-----------------------|-----------------------------------------------------|
//! | `uniform`   | [`Uniform`]           | 1.0 for every item                                  |
//! | `frequency` | [`AbsoluteFrequency`] | occurrence count over all draws (seen items only)   |
//! | `rolling`   | [`RollingWindow`]     | occurrence count over the last `window` draws       |
//! | `fibonacci` | [`FibonacciRecency`]  | Fibonacci-weighted occurrences, newest heaviest      |
//! | `gap`       | [`OverdueGap`]        | number of draws since the item was last drawn       |
//! | `hot-cold`  | [`HotCold`]           | recent frequency relative to the long-run rate      |
//!
//! [`all_scoring_modules`] returns the default module set used for training.

use std::collections::BTreeMap;

use tirage_engine::{HistoricalDraw, Pool, RuleSet};

use crate::module::{BoxedScoringModule, EntityScores, ModuleError, ScoringModule};

/// Default ordered module set.
#[must_use]
pub fn all_scoring_modules() -> Vec<BoxedScoringModule> {
    vec![
        Box::new(AbsoluteFrequency),
        Box::new(RollingWindow::new(20)),
        Box::new(FibonacciRecency::new(12)),
        Box::new(OverdueGap),
        Box::new(HotCold::new(5)),
    ]
}

/// Every built-in module, including the ones not in the default set.
#[must_use]
pub fn builtin_scoring_modules() -> Vec<BoxedScoringModule> {
    let mut modules = all_scoring_modules();
    modules.insert(0, Box::new(Uniform));
    modules
}

/// Looks up a built-in module by its id.
#[must_use]
pub fn scoring_module_by_id(id: &str) -> Option<BoxedScoringModule> {
    builtin_scoring_modules().into_iter().find(|m| m.id() == id)
}

fn count_occurrences<'a, I>(draws: I, pool: Pool) -> BTreeMap<u32, f32>
where
    I: IntoIterator<Item = &'a HistoricalDraw>,
{
    let mut counts = BTreeMap::new();
    for draw in draws {
        for &item in draw.items(pool) {
            *counts.entry(item).or_insert(0.0) += 1.0;
        }
    }
    counts
}

fn recent(draws: &[HistoricalDraw], window: usize) -> &[HistoricalDraw] {
    &draws[draws.len().saturating_sub(window)..]
}

fn check_window(window: usize) -> Result<(), ModuleError> {
    if window == 0 {
        return Err(ModuleError::new("window must be at least one draw"));
    }
    Ok(())
}

/// Scores every item of both ranges with 1.0.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uniform;

impl ScoringModule for Uniform {
    fn id(&self) -> &str {
        "uniform"
    }

    fn name(&self) -> String {
        "Uniform".to_owned()
    }

    fn clone_boxed(&self) -> BoxedScoringModule {
        Box::new(*self)
    }

    fn entity_scores(
        &self,
        _draws: &[HistoricalDraw],
        rules: &RuleSet,
    ) -> Result<EntityScores, ModuleError> {
        Ok(EntityScores::from_fn(rules, |_, _| 1.0))
    }
}

/// Counts how often each item was drawn.
///
/// Items never drawn get no score at all, and therefore are never sampled through this
/// module alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteFrequency;

impl ScoringModule for AbsoluteFrequency {
    fn id(&self) -> &str {
        "frequency"
    }

    fn name(&self) -> String {
        "AbsoluteFrequency".to_owned()
    }

    fn clone_boxed(&self) -> BoxedScoringModule {
        Box::new(*self)
    }

    fn entity_scores(
        &self,
        draws: &[HistoricalDraw],
        _rules: &RuleSet,
    ) -> Result<EntityScores, ModuleError> {
        Ok(EntityScores::new(
            count_occurrences(draws, Pool::Primary),
            count_occurrences(draws, Pool::Secondary),
        ))
    }
}

/// Counts occurrences within the most recent `window` draws.
#[derive(Debug, Clone, Copy)]
pub struct RollingWindow {
    window: usize,
}

impl RollingWindow {
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl ScoringModule for RollingWindow {
    fn id(&self) -> &str {
        "rolling"
    }

    fn name(&self) -> String {
        format!("RollingWindow({})", self.window)
    }

    fn clone_boxed(&self) -> BoxedScoringModule {
        Box::new(*self)
    }

    fn entity_scores(
        &self,
        draws: &[HistoricalDraw],
        _rules: &RuleSet,
    ) -> Result<EntityScores, ModuleError> {
        check_window(self.window)?;
        let draws = recent(draws, self.window);
        Ok(EntityScores::new(
            count_occurrences(draws, Pool::Primary),
            count_occurrences(draws, Pool::Secondary),
        ))
    }
}

/// Weights the occurrences of the last `depth` draws by Fibonacci numbers.
///
/// Of the `n` draws considered (at most `depth`), the oldest weighs `F(2) = 1`, the next
/// `F(3) = 2`, up to `F(n + 1)` for the newest.
#[derive(Debug, Clone, Copy)]
pub struct FibonacciRecency {
    depth: usize,
}

impl FibonacciRecency {
    /// Deepest supported history; keeps the largest weight exactly representable.
    pub const MAX_DEPTH: usize = 30;

    #[must_use]
    pub fn new(depth: usize) -> Self {
        Self { depth }
    }

    #[expect(clippy::cast_precision_loss)]
    fn weights(len: usize) -> Vec<f32> {
        // oldest first: 1, 2, 3, 5, 8, ...
        let mut weights = Vec::with_capacity(len);
        let (mut a, mut b) = (1_u32, 2_u32);
        for _ in 0..len {
            weights.push(a as f32);
            (a, b) = (b, a + b);
        }
        weights
    }
}

impl ScoringModule for FibonacciRecency {
    fn id(&self) -> &str {
        "fibonacci"
    }

    fn name(&self) -> String {
        format!("FibonacciRecency({})", self.depth)
    }

    fn clone_boxed(&self) -> BoxedScoringModule {
        Box::new(*self)
    }

    fn entity_scores(
        &self,
        draws: &[HistoricalDraw],
        _rules: &RuleSet,
    ) -> Result<EntityScores, ModuleError> {
        check_window(self.depth)?;
        if self.depth > Self::MAX_DEPTH {
            return Err(ModuleError::new(format!(
                "depth {} exceeds the maximum of {}",
                self.depth,
                Self::MAX_DEPTH
            )));
        }
        let draws = recent(draws, self.depth);
        let weights = Self::weights(draws.len());
        let mut scores = EntityScores::default();
        for (draw, weight) in draws.iter().zip(weights) {
            for pool in Pool::ALL {
                let table = match pool {
                    Pool::Primary => &mut scores.primary,
                    Pool::Secondary => &mut scores.secondary,
                };
                for &item in draw.items(pool) {
                    *table.entry(item).or_insert(0.0) += weight;
                }
            }
        }
        Ok(scores)
    }
}

/// Scores each item by how many draws ago it last appeared.
///
/// An item drawn in the latest draw scores 1; an item never drawn scores
/// `draws.len() + 1`. Favors overdue items.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverdueGap;

impl ScoringModule for OverdueGap {
    fn id(&self) -> &str {
        "gap"
    }

    fn name(&self) -> String {
        "OverdueGap".to_owned()
    }

    fn clone_boxed(&self) -> BoxedScoringModule {
        Box::new(*self)
    }

    #[expect(clippy::cast_precision_loss)]
    fn entity_scores(
        &self,
        draws: &[HistoricalDraw],
        rules: &RuleSet,
    ) -> Result<EntityScores, ModuleError> {
        Ok(EntityScores::from_fn(rules, |pool, item| {
            let gap = draws
                .iter()
                .rev()
                .position(|draw| draw.items(pool).contains(&item))
                .unwrap_or(draws.len());
            (gap + 1) as f32
        }))
    }
}

/// Compares the recent frequency of each item with its long-run rate.
///
/// Score is `(recent + 1) / (expected + 1)`, where `recent` counts occurrences in the
/// last `window` draws and `expected` is what the overall frequency predicts for a
/// window of that size. Hot items score above 1, cold items below.
#[derive(Debug, Clone, Copy)]
pub struct HotCold {
    window: usize,
}

impl HotCold {
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self { window }
    }
}

impl ScoringModule for HotCold {
    fn id(&self) -> &str {
        "hot-cold"
    }

    fn name(&self) -> String {
        format!("HotCold({})", self.window)
    }

    fn clone_boxed(&self) -> BoxedScoringModule {
        Box::new(*self)
    }

    #[expect(clippy::cast_precision_loss)]
    fn entity_scores(
        &self,
        draws: &[HistoricalDraw],
        rules: &RuleSet,
    ) -> Result<EntityScores, ModuleError> {
        check_window(self.window)?;
        let recent_draws = recent(draws, self.window);
        let overall = [
            count_occurrences(draws, Pool::Primary),
            count_occurrences(draws, Pool::Secondary),
        ];
        let latest = [
            count_occurrences(recent_draws, Pool::Primary),
            count_occurrences(recent_draws, Pool::Secondary),
        ];
        let ratio = recent_draws.len() as f32 / draws.len().max(1) as f32;
        Ok(EntityScores::from_fn(rules, |pool, item| {
            let index = match pool {
                Pool::Primary => 0,
                Pool::Secondary => 1,
            };
            let expected = overall[index].get(&item).copied().unwrap_or(0.0) * ratio;
            let recent = latest[index].get(&item).copied().unwrap_or(0.0);
            (recent + 1.0) / (expected + 1.0)
        }))
    }
}
