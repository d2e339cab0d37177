use std::{collections::BTreeMap, path::PathBuf};

use tirage_engine::{GameRules, RuleSet};

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct RulesArg {
    /// Only print this game [default: every known game]
    game: Option<String>,
    /// Output file path [default: stdout]
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &RulesArg) -> anyhow::Result<()> {
    let games = match &arg.game {
        Some(game) => BTreeMap::from([(game.to_ascii_lowercase(), util::game_rules(game)?)]),
        None => all_games(),
    };
    Output::save_json(&games, arg.output.clone())
}

fn all_games() -> BTreeMap<String, RuleSet> {
    GameRules::keys()
        .iter()
        .map(|&key| (key.to_owned(), GameRules::lookup(key)))
        .collect()
}
