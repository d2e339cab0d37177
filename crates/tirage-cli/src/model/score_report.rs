use std::collections::BTreeMap;

use serde::Serialize;
use tirage_scoring::{ModuleManager, ScoreProfile};

/// Score tables of every module, as printed by `tirage score`.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreReport {
    pub game: String,
    pub draw_count: usize,
    pub modules: Vec<ModuleScores>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleScores {
    pub name: String,
    pub primary: BTreeMap<u32, f32>,
    pub secondary: BTreeMap<u32, f32>,
}

impl ScoreReport {
    pub fn new(
        game: &str,
        draw_count: usize,
        modules: &ModuleManager,
        profile: ScoreProfile,
    ) -> Self {
        let modules = modules
            .names()
            .into_iter()
            .zip(profile)
            .map(|(name, scores)| ModuleScores {
                name,
                primary: scores.primary,
                secondary: scores.secondary,
            })
            .collect();
        Self {
            game: game.to_ascii_lowercase(),
            draw_count,
            modules,
        }
    }
}
