use clap::{Parser, Subcommand};

use self::{rules::RulesArg, score::ScoreArg, train::TrainArg};

mod rules;
mod score;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Train module weights on historical draws and save the strategy
    Train(#[clap(flatten)] TrainArg),
    /// Print the rules of the known games
    Rules(#[clap(flatten)] RulesArg),
    /// Print the per-item scores of each scoring module
    Score(#[clap(flatten)] ScoreArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Rules(arg) => rules::run(&arg)?,
        Mode::Score(arg) => score::run(&arg)?,
    }
    Ok(())
}
