use std::{path::PathBuf, time::Duration};

use chrono::Utc;
use rand::SeedableRng as _;
use rand_pcg::Pcg64;
use tirage_training::{
    GeneticParams, SearchStrategy, StopCondition, TrainingConfig, fitness::MAX_TRIALS,
    train_on_draws,
};

use crate::{
    model::strategy::{self, StrategyFile},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum StrategyKind {
    /// Fresh random weights every generation
    #[default]
    Random,
    /// Weights bred from the previous generation
    Genetic,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Game to train for (see `tirage rules`)
    game: String,
    /// Historical draws file (`.json`, or `;`-separated CSV)
    data: PathBuf,
    /// Output file path, `-` for stdout [default: strategie_{game}_{YYYYMMDD}.json]
    #[arg(long)]
    output: Option<PathBuf>,
    /// Number of generations
    #[arg(long, default_value_t = 40)]
    generations: usize,
    /// Candidates evaluated per generation
    #[arg(long, default_value_t = 1)]
    population_size: usize,
    /// Maximum number of sampled grids per fitness evaluation
    #[arg(long, default_value_t = MAX_TRIALS)]
    max_trials: usize,
    /// Search strategy (`random` or `genetic`)
    #[arg(long, default_value = "random")]
    strategy: StrategyKind,
    /// Seed of the random generator [default: random]
    #[arg(long)]
    seed: Option<u64>,
    /// Stop once this many chromosomes were evaluated
    #[arg(long)]
    max_evaluations: Option<usize>,
    /// Stop after this many seconds
    #[arg(long)]
    time_limit: Option<u64>,
    /// Comma-separated scoring module ids [default: the default module set]
    #[arg(long, value_delimiter = ',')]
    modules: Vec<String>,
}

impl TrainArg {
    /// Search settings without stop condition.
    fn config(&self) -> TrainingConfig {
        let strategy = match self.strategy {
            StrategyKind::Random => SearchStrategy::RandomRestart,
            StrategyKind::Genetic => SearchStrategy::Genetic(GeneticParams::default()),
        };
        TrainingConfig {
            generations: self.generations,
            population_size: self.population_size,
            max_trials: self.max_trials,
            strategy,
            stop: StopCondition::default(),
        }
    }

    /// Starts the `--time-limit` clock.
    fn stop_condition(&self) -> StopCondition {
        let mut stop = self
            .time_limit
            .map(|secs| StopCondition::time_limit(Duration::from_secs(secs)))
            .unwrap_or_default();
        if let Some(max) = self.max_evaluations {
            stop = stop.with_max_evaluations(max);
        }
        stop
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let rules = util::game_rules(&arg.game)?;
    let modules = util::scoring_modules(&arg.modules)?;
    let mut config = arg.config();
    let seed = arg.seed.unwrap_or_else(rand::random);
    let mut rng = Pcg64::seed_from_u64(seed);

    let draws = tirage_engine::load_draws(&arg.data, &rules)?;
    eprintln!(
        "Loaded {} draws from {} ({} to {})",
        draws.len(),
        arg.data.display(),
        draws.first().map(|d| d.date.to_string()).unwrap_or_default(),
        draws.last().map(|d| d.date.to_string()).unwrap_or_default(),
    );
    eprintln!("Modules: {}", modules.names().join(", "));

    config.stop = arg.stop_condition();
    log::debug!("training config: {config:?}");
    let outcome = train_on_draws(&draws, &rules, &modules, &config, &mut rng)?;

    eprintln!("Training completed.");
    eprintln!("  Seed: {seed}");
    eprintln!(
        "  Generations: {} ({} evaluations{})",
        outcome.generations_run,
        outcome.evaluations,
        if outcome.stopped_early {
            ", stopped early"
        } else {
            ""
        }
    );
    if let (Some(first), Some(last)) = (outcome.history.first(), outcome.history.last()) {
        eprintln!(
            "  Best fitness: {:.3} -> {:.3}",
            first.best_fitness, last.best_fitness
        );
    }
    eprintln!("  Weights:");
    for (name, weight) in &outcome.module_weights {
        eprintln!("    {name}: {weight:.3}");
    }

    let trained_at = Utc::now();
    let file = StrategyFile::from_outcome(&arg.game, trained_at, &outcome);
    let output = arg
        .output
        .clone()
        .unwrap_or_else(|| strategy::default_file_name(&arg.game, trained_at.date_naive()));
    let mut output = Output::from_output_path(Some(output))?;
    output.write_json(&file)?;

    eprintln!();
    eprintln!("Strategy saved successfully");
    eprintln!("  Path: {}", output.display_path());
    eprintln!("  Game: {}", file.game);
    eprintln!("  Trained at: {}", file.trained_at);
    eprintln!("  Final fitness: {:.3}", file.final_fitness);
    eprintln!(
        "  Grid: {:?} + {} {:?}",
        file.grille.numbers, rules.secondary_name, file.grille.secondary
    );

    Ok(())
}
