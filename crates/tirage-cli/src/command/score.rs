use std::path::PathBuf;

use anyhow::Context as _;

use crate::{
    model::score_report::ScoreReport,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ScoreArg {
    /// Game the draws belong to
    game: String,
    /// Historical draws file (`.json`, or `;`-separated CSV)
    data: PathBuf,
    /// Comma-separated scoring module ids [default: the default module set]
    #[arg(long, value_delimiter = ',')]
    modules: Vec<String>,
    /// Output file path [default: stdout]
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ScoreArg) -> anyhow::Result<()> {
    let rules = util::game_rules(&arg.game)?;
    let modules = util::scoring_modules(&arg.modules)?;
    let draws = tirage_engine::load_draws(&arg.data, &rules)?;
    let profile = modules
        .profiles(&draws, &rules)
        .context("Failed to compute module scores")?;
    eprintln!(
        "Scored {} draws with {} modules",
        draws.len(),
        modules.len()
    );
    let report = ScoreReport::new(&arg.game, draws.len(), &modules, profile);
    Output::save_json(&report, arg.output.clone())
}
