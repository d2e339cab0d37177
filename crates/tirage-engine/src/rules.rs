//! Game rules: how many items are drawn from which range.
//!
//! A [`RuleSet`] describes one game: the number of primary items drawn from the primary
//! range, and the number of secondary items (stars, chance numbers, ...) drawn from the
//! secondary range. Rule sets are looked up by game key through [`GameRules`].
//!
//! # Example
//!
//! ```
//! use tirage_engine::{GameRules, Pool};
//!
//! let rules = GameRules::lookup("euromillions");
//! assert_eq!(rules.count(Pool::Primary), 5);
//! assert_eq!(rules.range(Pool::Secondary).len(), 12);
//!
//! // unknown games resolve to the empty rule set
//! assert!(GameRules::lookup("bingo").is_empty());
//! ```

use std::{fmt, ops::RangeInclusive};

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::draw::Pool;

/// Inclusive range of item values, e.g. `1..=50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRange {
    pub lo: u32,
    pub hi: u32,
}

impl Default for ItemRange {
    /// The empty range.
    fn default() -> Self {
        Self { lo: 1, hi: 0 }
    }
}

impl ItemRange {
    #[must_use]
    pub const fn new(lo: u32, hi: u32) -> Self {
        Self { lo, hi }
    }

    /// Number of values in the range (0 when `hi < lo`).
    #[must_use]
    pub fn len(&self) -> usize {
        if self.hi < self.lo {
            0
        } else {
            (self.hi - self.lo) as usize + 1
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn contains(&self, value: u32) -> bool {
        (self.lo..=self.hi).contains(&value)
    }

    pub fn iter(&self) -> RangeInclusive<u32> {
        self.lo..=self.hi
    }
}

impl fmt::Display for ItemRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.lo, self.hi)
    }
}

/// Structural constants of one game.
///
/// The default value is the empty rule set, returned by [`GameRules::lookup`] for
/// unknown games.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Number of primary items per draw.
    pub primary_count: usize,
    /// Values primary items are drawn from.
    pub primary_range: ItemRange,
    /// Number of secondary items per draw.
    pub secondary_count: usize,
    /// Values secondary items are drawn from.
    pub secondary_range: ItemRange,
    /// Column prefix of secondary items in CSV history files (`etoile1`, `etoile2`, ...).
    pub secondary_name: String,
    /// Weekdays on which draws take place.
    pub draw_days: Vec<Weekday>,
}

#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("{pool} pool draws {count} items from a range of only {available} values")]
pub struct RuleSetError {
    pub pool: Pool,
    pub count: usize,
    pub available: usize,
}

impl RuleSet {
    /// Returns `true` for the empty rule set (nothing is drawn from either pool).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primary_count == 0
            && self.secondary_count == 0
            && self.primary_range.is_empty()
            && self.secondary_range.is_empty()
    }

    #[must_use]
    pub fn count(&self, pool: Pool) -> usize {
        match pool {
            Pool::Primary => self.primary_count,
            Pool::Secondary => self.secondary_count,
        }
    }

    #[must_use]
    pub fn range(&self, pool: Pool) -> ItemRange {
        match pool {
            Pool::Primary => self.primary_range,
            Pool::Secondary => self.secondary_range,
        }
    }

    /// Upper bound of a grid's size: `primary_count + secondary_count`.
    #[must_use]
    pub fn max_grid_len(&self) -> usize {
        self.primary_count + self.secondary_count
    }

    /// Checks that each pool draws no more items than its range holds.
    pub fn validate(&self) -> Result<(), RuleSetError> {
        for pool in Pool::ALL {
            let count = self.count(pool);
            let available = self.range(pool).len();
            if count > available {
                return Err(RuleSetError {
                    pool,
                    count,
                    available,
                });
            }
        }
        Ok(())
    }
}

/// Static registry of known games.
#[derive(Debug)]
pub struct GameRules;

impl GameRules {
    const KEYS: &'static [&'static str] = &["euromillions", "loto", "eurodreams"];

    /// Keys of every registered game.
    #[must_use]
    pub fn keys() -> &'static [&'static str] {
        Self::KEYS
    }

    /// Looks up the rule set of a game.
    ///
    /// Keys are matched case-insensitively. An unknown key yields [`RuleSet::default()`]
    /// instead of an error; callers that need a real game check [`RuleSet::is_empty`].
    #[must_use]
    pub fn lookup(game_key: &str) -> RuleSet {
        match game_key.to_ascii_lowercase().as_str() {
            "euromillions" => RuleSet {
                primary_count: 5,
                primary_range: ItemRange::new(1, 50),
                secondary_count: 2,
                secondary_range: ItemRange::new(1, 12),
                secondary_name: "etoile".to_owned(),
                draw_days: vec![Weekday::Tue, Weekday::Fri],
            },
            "loto" => RuleSet {
                primary_count: 5,
                primary_range: ItemRange::new(1, 49),
                secondary_count: 1,
                secondary_range: ItemRange::new(1, 10),
                secondary_name: "chance".to_owned(),
                draw_days: vec![Weekday::Mon, Weekday::Wed, Weekday::Sat],
            },
            "eurodreams" => RuleSet {
                primary_count: 6,
                primary_range: ItemRange::new(1, 40),
                secondary_count: 1,
                secondary_range: ItemRange::new(1, 5),
                secondary_name: "dream".to_owned(),
                draw_days: vec![Weekday::Mon, Weekday::Thu],
            },
            _ => RuleSet::default(),
        }
    }
}
