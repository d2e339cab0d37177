use std::{collections::BTreeMap, path::PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tirage_training::TrainingOutcome;

/// Saved result of a training run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct StrategyFile {
    pub game: String,
    pub trained_at: DateTime<Utc>,
    pub final_fitness: f32,
    /// Best weights in module order.
    pub weights: Vec<f32>,
    /// Final grid sampled from the best weights.
    pub grille: GridRecord,
    /// Best weight of each module, by module name.
    pub poids: BTreeMap<String, f32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GridRecord {
    pub numbers: Vec<u32>,
    pub secondary: Vec<u32>,
}

impl StrategyFile {
    pub fn from_outcome(game: &str, trained_at: DateTime<Utc>, outcome: &TrainingOutcome) -> Self {
        Self {
            game: game.to_ascii_lowercase(),
            trained_at,
            final_fitness: outcome.best.fitness,
            weights: outcome.best.chromosome.weights().to_vec(),
            grille: GridRecord {
                numbers: outcome.final_grid.primary().to_vec(),
                secondary: outcome.final_grid.secondary().to_vec(),
            },
            poids: outcome.module_weights.iter().cloned().collect(),
        }
    }
}

/// `strategie_{game}_{YYYYMMDD}.json`
pub fn default_file_name(game: &str, date: NaiveDate) -> PathBuf {
    PathBuf::from(format!(
        "strategie_{}_{}.json",
        game.to_ascii_lowercase(),
        date.format("%Y%m%d")
    ))
}
