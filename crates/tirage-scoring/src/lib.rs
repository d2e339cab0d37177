//! Scoring modules and the score profile they produce.
//!
//! A scoring module turns the historical draws of a game into two score tables: one
//! score per primary item and one per secondary item. Higher scores make an item more
//! likely to be sampled. The [`ModuleManager`] runs an ordered list of modules once per
//! training run and collects their output into a [`ScoreProfile`], index-aligned with the
//! weight vectors the optimizer searches over.
//!
//! # Architecture
//!
//! ```text
//! Historical draws + RuleSet
//!     ↓ scored by
//! ScoringModule (one per signal)
//!     ↓ collected by
//! ModuleManager
//!     ↓ produces
//! ScoreProfile (module i → EntityScores)
//! ```
//!
//! # Modules
//!
//! - [`module`] - The [`ScoringModule`] trait and [`EntityScores`]
//! - [`manager`] - [`ModuleManager`] and [`ScoreProfile`]
//! - [`builtin`] - Built-in modules (frequency, recency, gap, hot/cold, uniform)

pub use self::{
    manager::{InvalidModuleOutput, ModuleManager, ScoreProfile},
    module::{BoxedScoringModule, EntityScores, ModuleError, ScoringModule},
};

pub mod builtin;
pub mod manager;
pub mod module;
