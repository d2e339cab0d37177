use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One of the two item pools of a game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum Pool {
    #[display("primary")]
    Primary,
    #[display("secondary")]
    Secondary,
}

impl Pool {
    pub const ALL: [Pool; 2] = [Pool::Primary, Pool::Secondary];
}

/// A past draw: its date and the items drawn from each pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricalDraw {
    pub date: NaiveDate,
    pub primary: Vec<u32>,
    pub secondary: Vec<u32>,
}

impl HistoricalDraw {
    #[must_use]
    pub fn new(date: NaiveDate, primary: Vec<u32>, secondary: Vec<u32>) -> Self {
        Self {
            date,
            primary,
            secondary,
        }
    }

    #[must_use]
    pub fn items(&self, pool: Pool) -> &[u32] {
        match pool {
            Pool::Primary => &self.primary,
            Pool::Secondary => &self.secondary,
        }
    }
}

/// A sampled selection of items.
///
/// Both selections are sorted ascending and hold unique values. A selection may be
/// shorter than the count the rules ask for when sampling drew the same item twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    primary: Vec<u32>,
    secondary: Vec<u32>,
}

impl Grid {
    /// Builds a grid from raw draws, dropping duplicates and sorting each selection.
    #[must_use]
    pub fn from_draws<P, S>(primary: P, secondary: S) -> Self
    where
        P: IntoIterator<Item = u32>,
        S: IntoIterator<Item = u32>,
    {
        Self {
            primary: primary.into_iter().collect::<BTreeSet<_>>().into_iter().collect(),
            secondary: secondary.into_iter().collect::<BTreeSet<_>>().into_iter().collect(),
        }
    }

    #[must_use]
    pub fn primary(&self) -> &[u32] {
        &self.primary
    }

    #[must_use]
    pub fn secondary(&self) -> &[u32] {
        &self.secondary
    }

    #[must_use]
    pub fn selection(&self, pool: Pool) -> &[u32] {
        match pool {
            Pool::Primary => &self.primary,
            Pool::Secondary => &self.secondary,
        }
    }

    /// Total number of selected items over both pools.
    #[must_use]
    pub fn len(&self) -> usize {
        self.primary.len() + self.secondary.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
