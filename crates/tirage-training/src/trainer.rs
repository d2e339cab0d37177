//! Training entry point.

use std::path::Path;

use rand::Rng;
use tirage_engine::{GameRules, Grid, HistoricalDraw, RuleSet, load_draws};
use tirage_scoring::ModuleManager;

use crate::{
    chromosome::FitnessRecord,
    config::TrainingConfig,
    error::TrainingError,
    fitness::FitnessEvaluator,
    grid::GridGenerator,
    optimizer::{GenerationReport, Optimizer, SearchResult},
};

/// Result of a successful training run.
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    /// The fittest chromosome found and its fitness.
    pub best: FitnessRecord,
    /// A grid sampled from the best chromosome after the search.
    pub final_grid: Grid,
    /// `(module name, weight)` pairs in module registration order.
    pub module_weights: Vec<(String, f32)>,
    pub generations_run: usize,
    pub evaluations: usize,
    pub history: Vec<GenerationReport>,
    pub stopped_early: bool,
}

/// Trains a strategy for `game_key` on the draws stored at `data_source`.
///
/// The game must be known to [`GameRules`]. The data file is read with
/// [`load_draws`] before any module runs.
pub fn train<R>(
    game_key: &str,
    data_source: &Path,
    modules: &ModuleManager,
    config: &TrainingConfig,
    rng: &mut R,
) -> Result<TrainingOutcome, TrainingError>
where
    R: Rng + ?Sized,
{
    let rules = GameRules::lookup(game_key);
    if rules.is_empty() {
        return Err(TrainingError::UnknownGame(game_key.to_owned()));
    }
    rules.validate()?;
    let draws = load_draws(data_source, &rules)?;
    log::info!(
        "loaded {} draws for {game_key} from {}",
        draws.len(),
        data_source.display()
    );
    train_on_draws(&draws, &rules, modules, config, rng)
}

/// Trains a strategy on draws that are already loaded.
///
/// Each module computes its scores exactly once; the resulting profile is shared by
/// every fitness evaluation.
pub fn train_on_draws<R>(
    draws: &[HistoricalDraw],
    rules: &RuleSet,
    modules: &ModuleManager,
    config: &TrainingConfig,
    rng: &mut R,
) -> Result<TrainingOutcome, TrainingError>
where
    R: Rng + ?Sized,
{
    if draws.is_empty() {
        return Err(TrainingError::EmptyDataset);
    }
    config.validate()?;

    let profile = modules.profiles(draws, rules)?;
    let generator = GridGenerator::new(&profile, rules);
    let evaluator = FitnessEvaluator::for_draws(draws, config.max_trials);
    log::info!(
        "training with {} modules, {} trials per evaluation",
        modules.len(),
        evaluator.trial_count()
    );

    let result = Optimizer::new(generator, evaluator, config).run(rng)?;
    Ok(assemble(modules.names(), result))
}

fn assemble(names: Vec<String>, result: SearchResult) -> TrainingOutcome {
    let SearchResult {
        best,
        final_grid,
        history,
        evaluations,
        stopped_early,
    } = result;
    let module_weights = names
        .into_iter()
        .zip(best.chromosome.weights().iter().copied())
        .collect();
    TrainingOutcome {
        best,
        final_grid,
        module_weights,
        generations_run: history.len(),
        evaluations,
        history,
        stopped_early,
    }
}
