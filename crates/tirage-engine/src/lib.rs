//! Core data model for draw-based games.
//!
//! This crate holds the immutable inputs of a training run:
//!
//! - [`rules`] - Per-game structural constants ([`RuleSet`]) and the static [`GameRules`] registry
//! - [`draw`] - Historical draws, the item [`Pool`]s and the sampled [`Grid`]
//! - [`data`] - Loading historical draws from CSV or JSON files
//!
//! Everything here is constructed before optimization starts and never mutated afterwards.

pub use self::{
    data::{LoadError, load_draws},
    draw::{Grid, HistoricalDraw, Pool},
    rules::{GameRules, ItemRange, RuleSet, RuleSetError},
};

pub mod data;
pub mod draw;
pub mod rules;
