//! Training system for module weights.
//!
//! This crate searches for the weight vector (a [`Chromosome`]) that best combines the
//! score tables of a set of scoring modules into a sampling distribution over lottery
//! items.
//!
//! # How Training Works
//!
//! 1. **Rules** - Look up the game's [`RuleSet`](tirage_engine::RuleSet) and load its draws
//! 2. **Profile** - Every scoring module computes its per-item scores once
//! 3. **Search** - Candidate chromosomes are proposed and evaluated generation after generation
//! 4. **Fitness** - A candidate generates grids; its fitness is their mean size
//! 5. **Selection** - The best record is replaced only by a strictly fitter candidate
//! 6. **Result** - The best chromosome generates the final grid
//!
//! # Architecture
//!
//! ```text
//! Historical Draws + RuleSet
//!     ↓ scored by
//! Scoring Modules (tirage-scoring)
//!     ↓ produce
//! Score Profile
//!     ↓ combined with
//! Chromosome (one weight per module)
//!     ↓ sampled by
//! Grid Generator
//!     ↓ measured by
//! Fitness Evaluator
//!     ↓ guides
//! Optimizer
//! ```
//!
//! # Search Strategies
//!
//! - **Random restart** (default) - Each generation draws fresh random chromosomes
//! - **Genetic** - Each generation is bred from the previous one (see [`genetic`])
//!
//! With the default [`TrainingConfig`] (one candidate per generation, 40 generations,
//! at most 50 fitness trials) a run evaluates 41 chromosomes.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use rand::SeedableRng as _;
//! use rand_pcg::Pcg64;
//! use tirage_scoring::{ModuleManager, builtin};
//! use tirage_training::{TrainingConfig, train};
//!
//! let modules = ModuleManager::new(builtin::all_scoring_modules());
//! let mut rng = Pcg64::seed_from_u64(42);
//! let outcome = train(
//!     "euromillions",
//!     Path::new("data/euromillions.csv"),
//!     &modules,
//!     &TrainingConfig::default(),
//!     &mut rng,
//! )?;
//! println!("{:?} => {:.3}", outcome.final_grid, outcome.best.fitness);
//! # Ok::<(), tirage_training::TrainingError>(())
//! ```
//!
//! # Current Limitations
//!
//! - **Proxy fitness**: Fitness rewards weightings that avoid duplicate draws. It is not
//!   validated against future draws and says nothing about the odds of winning.
//! - **Static profile**: Module scores are computed once per run and never revisited.

pub use self::{
    chromosome::{Chromosome, FitnessRecord},
    config::{ConfigError, GeneticParams, SearchStrategy, StopCondition, TrainingConfig},
    error::TrainingError,
    fitness::FitnessEvaluator,
    grid::{GridGenerator, InvalidSamplingWeights},
    optimizer::{GenerationReport, Optimizer},
    trainer::{TrainingOutcome, train, train_on_draws},
};

pub mod chromosome;
pub mod config;
pub mod error;
pub mod fitness;
pub mod genetic;
pub mod grid;
pub mod optimizer;
pub mod trainer;
pub mod weights;
